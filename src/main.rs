use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use chatgate::connector::api::{serve, Container, ContainerConfig, Router, TerminalChat};
use chatgate::{ChatSurface, Commands, HttpGatewayClient, Transcript, DEFAULT_GREETING};

#[derive(Parser)]
#[command(name = "chatgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            public,
            mock_provider,
            model,
            max_upload_mb,
        } => {
            let container = Arc::new(Container::new(ContainerConfig {
                mock_provider,
                model,
                max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
            })?);

            let ip: IpAddr = if public {
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            } else {
                host.parse()?
            };
            serve(container, SocketAddr::new(ip, port)).await?;
        }

        Commands::Chat { url, no_greeting } => {
            let transcript = if no_greeting {
                Transcript::new()
            } else {
                Transcript::with_greeting(DEFAULT_GREETING)
            };
            let transport = Arc::new(HttpGatewayClient::new(url));
            let mut chat = TerminalChat::new(ChatSurface::with_transcript(transcript), transport);

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            chat.run(stdin, tokio::io::stdout()).await?;
        }

        command @ Commands::Send { .. } => {
            let router = Router::new();
            let output = router.route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
