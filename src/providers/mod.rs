//! Provider implementations and retry machinery.

pub mod gemini;
pub mod retry;
pub mod traits;

pub use gemini::GeminiProvider;
pub use retry::RetryConfig;
pub use traits::AnalysisProvider;
