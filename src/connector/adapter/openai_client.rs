use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::{CompletionProvider, DEFAULT_MODEL};
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for the OpenAI Chat Completions API (and compatible servers).
///
/// The prompt is sent as a single `user` message and the first choice's
/// content is returned. There is no client-side timeout; a call lasts as long
/// as the provider takes.
///
/// Configuration comes from the environment at startup:
///
/// | Variable          | Default                  | Purpose                       |
/// |-------------------|--------------------------|-------------------------------|
/// | `OPENAI_API_KEY`  | unset                    | Bearer credential             |
/// | `OPENAI_BASE_URL` | `https://api.openai.com` | Any compatible endpoint       |
/// | `OPENAI_MODEL`    | `gpt-4o`                 | Read by the container         |
///
/// Without a key the client is still constructed, but every call fails with
/// [`DomainError::MissingCredential`] before any request is made.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            url,
        }
    }

    pub fn from_env() -> Self {
        let key = std::env::var("OPENAI_API_KEY").ok();
        let base =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(key, base)
    }

    /// Model named by `OPENAI_MODEL`, or the default.
    pub fn model_from_env() -> String {
        std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string())
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, DomainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::missing_credential("OPENAI_API_KEY is not set"))?;

        let request = ApiRequest {
            model,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("OpenAiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiClient: API returned {status}: {body}");
            return Err(DomainError::provider(format!(
                "OpenAiClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::provider(format!("OpenAiClient: failed to parse response: {e}"))
        })?;

        Ok(api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = OpenAiClient::new(Some("sk-test".into()), "http://localhost:8080/");
        assert_eq!(client.url(), "http://localhost:8080/v1/chat/completions");
        assert!(client.has_credential());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let client = OpenAiClient::new(Some("  ".into()), DEFAULT_BASE_URL);
        assert!(!client.has_credential());
    }

    #[tokio::test]
    async fn missing_key_fails_at_provider_call() {
        let client = OpenAiClient::new(None, "http://127.0.0.1:9");
        let err = client.generate("gpt-4o", "hi").await.unwrap_err();
        assert!(matches!(err, DomainError::MissingCredential(_)));
    }

    #[test]
    fn response_content_parses() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let parsed: ApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hello"));
    }

    #[test]
    fn request_shape_is_single_user_message() {
        let request = ApiRequest {
            model: "gpt-4o",
            messages: vec![ApiMessage {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4o",
                "messages": [{ "role": "user", "content": "hi" }]
            })
        );
    }
}
