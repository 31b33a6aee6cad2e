use clap::Subcommand;

use crate::connector::adapter::DEFAULT_GATEWAY_URL;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the completion gateway (POST /api/chat)
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of --host, exposing the gateway on all network interfaces
        #[arg(long)]
        public: bool,

        /// Use the offline provider instead of OpenAI: `echo` or `fail`
        #[arg(long)]
        mock_provider: Option<String>,

        /// Model identifier sent to the provider (default: $OPENAI_MODEL or gpt-4o)
        #[arg(long)]
        model: Option<String>,

        /// Largest accepted request body in megabytes
        #[arg(long, default_value = "25")]
        max_upload_mb: usize,
    },

    /// Interactive chat against a running gateway
    Chat {
        #[arg(long, default_value = DEFAULT_GATEWAY_URL)]
        url: String,

        /// Start with an empty transcript instead of the greeting
        #[arg(long)]
        no_greeting: bool,
    },

    /// Send one message and print the reply
    Send {
        message: String,

        /// File to attach; repeat for several
        #[arg(short, long)]
        file: Vec<String>,

        #[arg(long, default_value = DEFAULT_GATEWAY_URL)]
        url: String,
    },
}
