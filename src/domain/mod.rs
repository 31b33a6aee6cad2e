//! # Domain Layer
//!
//! Chat models, prompt assembly, and the error type.
//! This layer is independent of HTTP and provider details.

pub mod error;
pub mod models;
pub mod prompt;

pub use error::*;
pub use models::*;
pub use prompt::*;
