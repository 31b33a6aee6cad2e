//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Providers (OpenAI chat completions, offline mock)
//! - Gateway client (multipart over HTTP)
//! - API surface (axum routes, CLI router, terminal chat)

pub mod adapter;
pub mod api;

pub use adapter::*;
