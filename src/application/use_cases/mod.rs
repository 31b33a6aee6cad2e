mod chat_surface;
mod complete_chat;

pub use chat_surface::*;
pub use complete_chat::*;
