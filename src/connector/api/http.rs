use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Json;
use tokio::net::TcpListener;
use tracing::info;

use super::container::Container;
use super::controller::chat_handler;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// Routes served by the gateway:
/// - `GET /`: the browser chat page
/// - `GET /health`
/// - `POST /api/chat`: multipart in, `{ "text" }` or `{ "error" }` out
pub fn http_router(container: Arc<Container>) -> axum::Router {
    let body_limit = container.max_upload_bytes();
    axum::Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/chat", post(chat_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(container)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        "Gateway listening on http://{} (provider={}, model={})",
        listener.local_addr()?,
        container.provider_name(),
        container.model()
    );

    axum::serve(listener, http_router(container))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
