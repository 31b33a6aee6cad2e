//! End-to-end tests for the completion gateway.
//!
//! Each test binds the real router on an ephemeral port and talks to it over HTTP.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tokio::net::TcpListener;

use chatgate::connector::api::{http_router, Container, ContainerConfig};
use chatgate::{
    AttachedFile, ChatSurface, ChatTransport, CompletionProvider, CompletionRequest, DomainError,
    HttpGatewayClient, MockProvider, Role, SubmitOutcome, DEFAULT_MODEL, FALLBACK_REPLY,
};

struct RecordingProvider {
    prompts: Mutex<Vec<String>>,
    reply: Option<String>,
}

impl RecordingProvider {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            reply: Some(text.to_string()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            reply: None,
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    async fn generate(&self, _model: &str, prompt: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| DomainError::provider("401 Unauthorized: invalid api key sk-secret"))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

async fn spawn_gateway(provider: Arc<dyn CompletionProvider>) -> String {
    spawn_gateway_with_config(provider, ContainerConfig::default()).await
}

async fn spawn_gateway_with_config(
    provider: Arc<dyn CompletionProvider>,
    config: ContainerConfig,
) -> String {
    let container = Arc::new(Container::with_provider(provider, DEFAULT_MODEL, config));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, http_router(container))
            .await
            .expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn hi_without_files_returns_provider_text() {
    let provider = RecordingProvider::replying("hello");
    let base = spawn_gateway(provider.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .multipart(Form::new().text("message", "hi"))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "text": "hello" }));
    assert_eq!(provider.prompts(), vec!["hi".to_string()]);
}

#[tokio::test]
async fn attachment_names_and_types_are_listed_in_prompt() {
    let provider = RecordingProvider::replying("ok");
    let base = spawn_gateway(provider.clone()).await;

    let client = HttpGatewayClient::new(&base);
    let request = CompletionRequest::new("look")
        .with_file(AttachedFile::new("a.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]));
    let text = client.send(&request).await.expect("send");

    assert_eq!(text, "ok");
    assert_eq!(
        provider.prompts(),
        vec!["look\n\nAttached files:\n- a.png (image/png)\n".to_string()]
    );
}

#[tokio::test]
async fn one_manifest_line_per_file() {
    let provider = RecordingProvider::replying("ok");
    let base = spawn_gateway(provider.clone()).await;

    let client = HttpGatewayClient::new(&base);
    let request = CompletionRequest::new("compare these").with_files(vec![
        AttachedFile::new("a.png", "image/png", vec![1]),
        AttachedFile::new("b.csv", "text/csv", b"x,y\n1,2\n".to_vec()),
        AttachedFile::new("c.pdf", "application/pdf", vec![2, 3]),
    ]);
    client.send(&request).await.expect("send");

    let prompt = &provider.prompts()[0];
    let manifest: Vec<_> = prompt.lines().filter(|l| l.starts_with("- ")).collect();
    assert_eq!(
        manifest,
        vec![
            "- a.png (image/png)",
            "- b.csv (text/csv)",
            "- c.pdf (application/pdf)"
        ]
    );
    assert!(!prompt.contains("x,y"));
}

#[tokio::test]
async fn provider_failure_is_generic_json_error() {
    let provider = RecordingProvider::failing();
    let base = spawn_gateway(provider.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .multipart(Form::new().text("message", "hi"))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 500);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "error": "Something went wrong." }));
    assert_eq!(provider.prompts().len(), 1);
}

#[tokio::test]
async fn non_multipart_body_is_generic_json_error() {
    let provider = RecordingProvider::replying("unused");
    let base = spawn_gateway(provider.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&serde_json::json!({ "message": "hi" }))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "error": "Something went wrong." }));
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn missing_message_field_is_treated_as_empty() {
    let provider = RecordingProvider::replying("ok");
    let base = spawn_gateway(provider.clone()).await;

    let part = Part::bytes(vec![1, 2, 3])
        .file_name("a.png")
        .mime_str("image/png")
        .unwrap();
    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .multipart(Form::new().part("files", part).text("extra", "ignored"))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 200);
    assert_eq!(
        provider.prompts(),
        vec!["\n\nAttached files:\n- a.png (image/png)\n".to_string()]
    );
}

#[tokio::test]
async fn oversized_upload_is_generic_json_error() {
    let provider = RecordingProvider::replying("unused");
    let config = ContainerConfig {
        max_upload_bytes: 1024,
        ..ContainerConfig::default()
    };
    let base = spawn_gateway_with_config(provider.clone(), config).await;

    let part = Part::bytes(vec![0u8; 10_000])
        .file_name("big.bin")
        .mime_str("application/octet-stream")
        .unwrap();
    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .multipart(Form::new().text("message", "hi").part("files", part))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 500);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "error": "Something went wrong." }));
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn text_field_named_files_is_rejected() {
    let provider = RecordingProvider::replying("unused");
    let base = spawn_gateway(provider.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .multipart(Form::new().text("message", "hi").text("files", "plain"))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "error": "Something went wrong." }));
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn client_reports_gateway_error_as_transport_error() {
    let base = spawn_gateway(Arc::new(MockProvider::failing())).await;

    let err = HttpGatewayClient::new(&base)
        .send(&CompletionRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(err.is_transport_error());
}

#[tokio::test]
async fn health_and_index_are_served() {
    let base = spawn_gateway(Arc::new(MockProvider::new())).await;
    let client = reqwest::Client::new();

    let health: serde_json::Value = client
        .get(format!("{base}/health"))
        .send()
        .await
        .expect("health")
        .json()
        .await
        .expect("json");
    assert_eq!(health, serde_json::json!({ "status": "ok" }));

    let page = client
        .get(format!("{base}/"))
        .send()
        .await
        .expect("index")
        .text()
        .await
        .expect("text");
    assert!(page.contains("/api/chat"));
    assert!(page.contains("Chat History"));
    assert!(page.contains("id=\"settings\""));
}

#[tokio::test]
async fn chat_surface_round_trip_through_gateway() {
    let base = spawn_gateway(Arc::new(MockProvider::new())).await;
    let transport = HttpGatewayClient::new(&base);
    let mut surface = ChatSurface::new();

    surface.set_input("look");
    surface.attach(
        vec![AttachedFile::new("a.png", "image/png", vec![1, 2])],
        chatgate::AttachSource::Drop,
    );
    let outcome = surface.submit(&transport).await;

    assert_eq!(outcome, SubmitOutcome::Resolved);
    let messages = surface.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role(), Role::User);
    assert_eq!(messages[0].files().len(), 1);
    assert_eq!(
        messages[1].content(),
        "echo: look\n\nAttached files:\n- a.png (image/png)\n"
    );
}

#[tokio::test]
async fn chat_surface_shows_fallback_when_gateway_fails() {
    let base = spawn_gateway(Arc::new(MockProvider::failing())).await;
    let transport = HttpGatewayClient::new(&base);
    let mut surface = ChatSurface::new();

    surface.set_input("hi");
    let outcome = surface.submit(&transport).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(surface.transcript().len(), 2);
    assert_eq!(
        surface.transcript().last().map(|m| m.content()),
        Some(FALLBACK_REPLY)
    );
}
