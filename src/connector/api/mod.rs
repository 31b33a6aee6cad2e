pub mod container;
pub mod controller;
pub mod http;
pub mod router;
pub mod terminal;

pub use container::{Container, ContainerConfig, DEFAULT_MAX_UPLOAD_BYTES};
pub use http::{http_router, serve};
pub use router::Router;
pub use terminal::{parse_line, render_message, TerminalChat, TerminalInput};
