mod chat_transport;
mod completion_provider;

pub use chat_transport::*;
pub use completion_provider::*;
