//! Public types for the Verdict API.

mod classification;
mod request;

pub use classification::{
    ClassificationOutcome, FeedbackClassification, MAX_TAGS, Provenance, Sentiment,
};
pub use request::FeedbackRequest;
