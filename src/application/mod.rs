//! # Application Layer
//!
//! Use cases coordinating the domain with providers and transports.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
