use async_trait::async_trait;

use crate::domain::{CompletionRequest, DomainError};

/// Delivers a submission to the completion gateway and returns the generated text.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &CompletionRequest) -> Result<String, DomainError>;
}
