use serde::{Deserialize, Serialize};

use super::AttachedFile;

/// The message shown to callers whenever the gateway fails, whatever the cause.
pub const GATEWAY_ERROR_MESSAGE: &str = "Something went wrong.";

/// One submission: the message text and the files attached to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionRequest {
    message: String,
    files: Vec<AttachedFile>,
}

impl CompletionRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            files: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<AttachedFile>) -> Self {
        self.files = files;
        self
    }

    pub fn with_file(mut self, file: AttachedFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn files(&self) -> &[AttachedFile] {
        &self.files
    }
}

/// JSON body of `/api/chat`: exactly one of `text` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletionResponse {
    Text { text: String },
    Error { error: String },
}

impl CompletionResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn error() -> Self {
        Self::Error {
            error: GATEWAY_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
