use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, error};

use crate::domain::{AttachedFile, CompletionRequest, CompletionResponse, DomainError};

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Read the form, run the completion, and collapse any failure into the
    /// single generic error body.
    pub async fn chat(
        &self,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> (StatusCode, Json<CompletionResponse>) {
        match self.complete(multipart).await {
            Ok(text) => (StatusCode::OK, Json(CompletionResponse::text(text))),
            Err(e) => {
                error!("Error in chat handler: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(CompletionResponse::error()),
                )
            }
        }
    }

    async fn complete(
        &self,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<String, DomainError> {
        let multipart =
            multipart.map_err(|e| DomainError::invalid_input(format!("not a multipart body: {e}")))?;
        let request = read_request(multipart).await?;

        self.container
            .complete_chat_use_case()
            .execute(&request)
            .await
    }
}

/// `message` is the first text field of that name (missing means empty);
/// every `files` field becomes an attachment and must be a file part.
/// Other fields are ignored.
pub async fn read_request(mut multipart: Multipart) -> Result<CompletionRequest, DomainError> {
    let mut message: Option<String> = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::invalid_input(format!("malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("message") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| DomainError::invalid_input(format!("unreadable message: {e}")))?;
                message.get_or_insert(text);
            }
            Some("files") => {
                let Some(name) = field.file_name().map(str::to_string) else {
                    return Err(DomainError::file_read("`files` field is not a file upload"));
                };
                let mime_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| DomainError::file_read(format!("{name}: {e}")))?;
                files.push(AttachedFile::new(name, mime_type, bytes.to_vec()));
            }
            other => debug!("Ignoring form field {:?}", other),
        }
    }

    Ok(CompletionRequest::new(message.unwrap_or_default()).with_files(files))
}

/// `POST /api/chat`
pub async fn chat_handler(
    State(container): State<Arc<Container>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Json<CompletionResponse>) {
    ChatController::new(&container).chat(multipart).await
}
