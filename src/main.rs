//! relaybot binary entry point.

use std::sync::Arc;

use clap::Parser;
use relaybot::cli::{Cli, Commands, StdoutSink};
use relaybot::config::RelayConfig;
use relaybot::relay::Relay;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(e) = run(cli).await {
        tracing::error!(category = %e.category(), error = %e, "relaybot exited");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> relaybot::error::Result<()> {
    let mut config = RelayConfig::load(cli.config.as_deref())?;
    cli.overrides.apply(&mut config);
    tracing::debug!(?config, "configuration resolved");

    let relay = Arc::new(Relay::from_config(config)?);

    match cli.command {
        Commands::Run => relaybot::discord::run(relay).await,
        Commands::Chat(args) => {
            relay
                .handle_incoming(&args.user, &args.message, &StdoutSink)
                .await
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
