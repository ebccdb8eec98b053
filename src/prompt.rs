//! Prompt construction for the generative analysis call.

use crate::types::FeedbackRequest;

/// Build the analysis prompt for a feedback request.
///
/// Embeds the product label and feedback text and pins down the output
/// contract: strict JSON, three-value sentiment, short emotion/intent
/// phrases, string-array tags.
pub fn build_prompt(request: &FeedbackRequest) -> String {
    format!(
        "You are an AI specializing in analyzing customer feedback for products.\n\
         \n\
         Analyze the following customer feedback for the product \"{product}\" \
         and determine the sentiment, emotion, and intent of the customer. \
         Also, extract relevant tags or keywords from the feedback.\n\
         \n\
         Feedback: {feedback}\n\
         \n\
         Provide the output in JSON format with the keys \"sentiment\", \
         \"emotion\", \"intent\" and \"tags\".\n\
         Make sure the sentiment is one of \"positive\", \"negative\", or \"neutral\".\n\
         The emotion and intent should be a short phrase, maximum of 5 words.\n\
         The tags should be an array of strings.",
        product = request.product_label,
        feedback = request.text,
    )
}
