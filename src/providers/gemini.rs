//! Gemini `generateContent` provider.
//!
//! Talks to the Google Generative Language REST API and parses the
//! model's JSON answer into a [`FeedbackClassification`]. JSON response
//! mode is requested, but the candidate text is still fence-stripped
//! before parsing because models occasionally wrap output in markdown
//! code blocks anyway.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::prompt::build_prompt;
use crate::types::{FeedbackClassification, FeedbackRequest};
use crate::{Result, VerdictError};

use super::traits::AnalysisProvider;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Provider backed by the Gemini `generateContent` endpoint.
///
/// # Example
///
/// ```ignore
/// use verdict::providers::GeminiProvider;
///
/// let provider = GeminiProvider::new("your-key").model("gemini-2.0-flash");
/// ```
pub struct GeminiProvider {
    api_key: String,
    model: String,
    /// Override base URL (testing with wiremock).
    base_url: String,
    /// Per-request timeout in seconds.
    timeout_secs: u64,
    /// Shared HTTP client.
    http_client: reqwest::Client,
}

// Response envelope, only the fields we read.

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiProvider {
    /// Create a provider with the default model and a fresh HTTP client.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http_client(api_key, reqwest::Client::new())
    }

    /// Create a provider sharing an existing HTTP client.
    ///
    /// Prefer this over [`new`](Self::new) when several components
    /// should share a connection pool.
    pub fn with_http_client(api_key: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 120,
            http_client,
        }
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL. Used for testing with wiremock.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Map a non-success HTTP status to the error taxonomy.
    async fn error_from_response(response: reqwest::Response) -> VerdictError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);
        let message = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => VerdictError::AuthenticationFailed,
            429 => VerdictError::RateLimited { retry_after },
            code => VerdictError::Api {
                status: code,
                message,
            },
        }
    }
}

/// Strip a surrounding markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string ("json") on the opening fence line
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[async_trait]
impl AnalysisProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze(&self, request: &FeedbackRequest) -> Result<FeedbackClassification> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": build_prompt(request) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json"
            }
        });

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| VerdictError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| VerdictError::Http(e.to_string()))?;

        let text = envelope
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|part| part.text.as_str())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(VerdictError::EmptyResponse);
        }

        let classification: FeedbackClassification =
            serde_json::from_str(strip_code_fence(text))
                .map_err(|e| VerdictError::SchemaViolation(e.to_string()))?;
        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::strip_code_fence;

    #[test]
    fn strips_json_fence() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"a\": 1}");
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = "```\n{}\n```";
        assert_eq!(strip_code_fence(fenced), "{}");
    }

    #[test]
    fn leaves_plain_json_alone() {
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
    }
}
