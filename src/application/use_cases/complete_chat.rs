use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::CompletionProvider;
use crate::domain::{build_prompt, AttachedFile, CompletionRequest, DomainError, EncodedFile};

/// Model used for every completion unless the deployment overrides it.
pub const DEFAULT_MODEL: &str = "gpt-4o";

pub struct CompleteChatUseCase {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl CompleteChatUseCase {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Encode the attachments, build the prompt, and call the provider once.
    ///
    /// Only the generated text is returned.
    pub async fn execute(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        let start_time = Instant::now();

        let encoded = encode_files(request.files());
        let encoded_bytes: usize = encoded.iter().map(|f| f.content.len()).sum();
        debug!(
            "Encoded {} attachment(s) into {} base64 bytes",
            encoded.len(),
            encoded_bytes
        );

        let prompt = build_prompt(request.message(), request.files());
        info!(
            "Requesting completion from {} (model={}, prompt_chars={}, files={})",
            self.provider.name(),
            self.model,
            prompt.chars().count(),
            request.files().len()
        );

        let text = self.provider.generate(&self.model, &prompt).await?;

        info!(
            "Completion returned {} chars in {:.2}s",
            text.chars().count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(text)
    }
}

pub fn encode_files(files: &[AttachedFile]) -> Vec<EncodedFile> {
    files.iter().map(AttachedFile::encode).collect()
}
