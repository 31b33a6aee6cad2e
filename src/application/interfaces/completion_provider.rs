use async_trait::async_trait;

use crate::domain::DomainError;

/// A hosted text-generation service.
///
/// Implementors own transport, credentials, and vendor request/response
/// shapes. Callers hand over a finished prompt and get the generated text back.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate text for `prompt` with the given model. One call, no retry.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, DomainError>;

    fn name(&self) -> &str;
}
