use anyhow::Result;

use crate::Commands;

use super::controller::SendController;

/// Dispatches the one-shot CLI commands. `serve` and `chat` run until
/// interrupted and are handled directly in main.
pub struct Router {
    send_controller: SendController,
}

impl Router {
    pub fn new() -> Self {
        Self {
            send_controller: SendController::new(),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Send { message, file, url } => {
                self.send_controller.send(message, file, url).await
            }
            Commands::Serve { .. } => unreachable!("serve is handled separately in main"),
            Commands::Chat { .. } => unreachable!("chat is handled separately in main"),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
