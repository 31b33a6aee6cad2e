use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::application::ChatTransport;
use crate::domain::{AttachedFile, CompletionRequest, CompletionResponse, DomainError};

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:3000";
const CHAT_PATH: &str = "/api/chat";

/// Posts submissions to a running gateway as `multipart/form-data`.
///
/// The form carries a `message` text field and one `files` part per
/// attachment. Any non-2xx status, `{ "error": ... }` body, or undecodable
/// body is reported as a transport error. An attachment whose type is not a
/// valid MIME type fails the send before anything goes over the wire.
pub struct HttpGatewayClient {
    client: reqwest::Client,
    url: String,
}

impl HttpGatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            url: format!("{}{}", base.trim_end_matches('/'), CHAT_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_form(request: &CompletionRequest) -> Result<Form, DomainError> {
        let mut form = Form::new().text("message", request.message().to_string());
        for file in request.files() {
            form = form.part("files", Self::file_part(file)?);
        }
        Ok(form)
    }

    fn file_part(file: &AttachedFile) -> Result<Part, DomainError> {
        let part = Part::bytes(file.bytes().to_vec()).file_name(file.name().to_string());
        if file.mime_type().is_empty() {
            return Ok(part);
        }
        part.mime_str(file.mime_type()).map_err(|e| {
            DomainError::invalid_input(format!(
                "HttpGatewayClient: invalid MIME type {:?} for {}: {e}",
                file.mime_type(),
                file.name()
            ))
        })
    }
}

#[async_trait]
impl ChatTransport for HttpGatewayClient {
    async fn send(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        debug!(
            "Posting message ({} chars, {} files) to {}",
            request.message().len(),
            request.files().len(),
            self.url
        );

        let form = Self::build_form(request)?;
        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("HttpGatewayClient: request failed: {e}")))?;

        let status = response.status();
        let body: CompletionResponse = response.json().await.map_err(|e| {
            DomainError::transport(format!("HttpGatewayClient: invalid response body ({status}): {e}"))
        })?;

        match body {
            CompletionResponse::Text { text } if status.is_success() => Ok(text),
            CompletionResponse::Text { .. } => Err(DomainError::transport(format!(
                "HttpGatewayClient: gateway returned {status}"
            ))),
            CompletionResponse::Error { error } => Err(DomainError::transport(format!(
                "HttpGatewayClient: gateway returned {status}: {error}"
            ))),
        }
    }
}
