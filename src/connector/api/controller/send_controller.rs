use anyhow::Result;

use crate::application::ChatTransport;
use crate::connector::adapter::HttpGatewayClient;
use crate::domain::{AttachedFile, CompletionRequest};

/// One-shot submission from the command line.
pub struct SendController;

impl SendController {
    pub fn new() -> Self {
        Self
    }

    pub async fn send(&self, message: String, files: Vec<String>, url: String) -> Result<String> {
        if message.trim().is_empty() {
            anyhow::bail!("Cannot send without a message.");
        }

        let mut request = CompletionRequest::new(message);
        for path in files {
            request = request.with_file(AttachedFile::from_path(&path).await?);
        }

        let client = HttpGatewayClient::new(url);
        Ok(client.send(&request).await?)
    }
}

impl Default for SendController {
    fn default() -> Self {
        Self::new()
    }
}
