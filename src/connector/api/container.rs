use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::{debug, info, warn};

use crate::application::{CompleteChatUseCase, CompletionProvider};
use crate::connector::adapter::{MockMode, MockProvider, OpenAiClient};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub struct ContainerConfig {
    /// `echo` or `fail` to run against the offline provider instead of OpenAI.
    pub mock_provider: Option<String>,
    /// Overrides the model read from the environment.
    pub model: Option<String>,
    /// Largest accepted `/api/chat` request body.
    pub max_upload_bytes: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            mock_provider: None,
            model: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Gateway wiring built once at startup and shared by every request.
pub struct Container {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let provider: Arc<dyn CompletionProvider> = match config.mock_provider.as_deref() {
            Some(mode) => {
                let Some(mode) = MockMode::from_str(mode) else {
                    bail!("unknown mock provider mode: {mode} (expected echo or fail)");
                };
                debug!("Using mock provider ({:?})", mode);
                Arc::new(MockProvider::with_mode(mode))
            }
            None => {
                let client = OpenAiClient::from_env();
                if client.has_credential() {
                    info!("Using OpenAI provider at {}", client.url());
                } else {
                    warn!("OPENAI_API_KEY is not set; every completion request will fail");
                }
                Arc::new(client)
            }
        };

        let model = config
            .model
            .clone()
            .unwrap_or_else(OpenAiClient::model_from_env);

        Ok(Self::with_provider(provider, model, config))
    }

    /// Wire an explicit provider, bypassing environment lookup.
    pub fn with_provider(
        provider: Arc<dyn CompletionProvider>,
        model: impl Into<String>,
        config: ContainerConfig,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            config,
        }
    }

    pub fn complete_chat_use_case(&self) -> CompleteChatUseCase {
        CompleteChatUseCase::new(self.provider.clone()).with_model(&self.model)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.config.max_upload_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_provider_is_selected() {
        let container = Container::new(ContainerConfig {
            mock_provider: Some("echo".to_string()),
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(container.provider_name(), "mock");
        assert_eq!(container.model(), "gpt-4o");
        assert_eq!(container.complete_chat_use_case().model(), "gpt-4o");
    }

    #[test]
    fn unknown_mock_mode_is_rejected() {
        let result = Container::new(ContainerConfig {
            mock_provider: Some("sometimes".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
