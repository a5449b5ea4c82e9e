pub mod gemini;

use async_trait::async_trait;

use crate::error::AppError;

pub use gemini::GeminiGenerator;

/// Single-shot text generation backed by a hosted model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt. `Ok(None)` means the provider answered without any text.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, AppError>;

    /// Model identifier sent to the provider.
    fn model(&self) -> &str;
}
