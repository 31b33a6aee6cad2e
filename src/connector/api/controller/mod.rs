pub mod chat_controller;
pub mod send_controller;

pub use chat_controller::{chat_handler, read_request, ChatController};
pub use send_controller::SendController;
