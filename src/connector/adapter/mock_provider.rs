use async_trait::async_trait;
use tracing::debug;

use crate::application::CompletionProvider;
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    /// Reply with `echo: <prompt>`.
    Echo,
    /// Fail every call with a provider error.
    Fail,
}

impl MockMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "echo" => Some(MockMode::Echo),
            "fail" => Some(MockMode::Fail),
            _ => None,
        }
    }
}

/// Offline provider for local runs and tests.
pub struct MockProvider {
    mode: MockMode,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            mode: MockMode::Echo,
        }
    }

    pub fn failing() -> Self {
        Self {
            mode: MockMode::Fail,
        }
    }

    pub fn with_mode(mode: MockMode) -> Self {
        Self { mode }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, DomainError> {
        debug!("Mock completion for model {model} ({} chars)", prompt.len());
        match self.mode {
            MockMode::Echo => Ok(format!("echo: {prompt}")),
            MockMode::Fail => Err(DomainError::provider("mock provider configured to fail")),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
