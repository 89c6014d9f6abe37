//! Command-line surface for the relaybot binary.

use std::path::PathBuf;

use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};

use crate::config::RelayConfig;
use crate::error::Result;
use crate::relay::ReplySink;

/// relaybot CLI
#[derive(Parser, Debug)]
#[command(name = "relaybot", version, about = "Chat relay to a local language model")]
pub struct Cli {
    /// Config file (defaults to relaybot.toml in the platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and relay messages
    Run,
    /// Send one message through the relay and print the replies
    Chat(ChatArgs),
}

/// Arguments for the `chat` subcommand.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// User id the message is recorded under
    #[arg(long, default_value = "cli")]
    pub user: String,

    /// Message text, or a command such as "!analyze example.com"
    pub message: String,
}

/// Settings that win over file and environment values.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Chat-completion URL
    #[arg(long, global = true)]
    pub inference_url: Option<String>,

    /// Model name sent with each request
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// System prompt
    #[arg(short, long, global = true)]
    pub system: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long, global = true)]
    pub temperature: Option<f64>,

    /// Max tokens
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,
}

impl Overrides {
    pub fn apply(&self, config: &mut RelayConfig) {
        if let Some(url) = &self.inference_url {
            config.inference_url = url.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(system) = &self.system {
            config.system_prompt = system.clone();
        }
        if let Some(t) = self.temperature {
            config.temperature = t;
        }
        if let Some(max) = self.max_tokens {
            config.max_tokens = max;
        }
    }
}

/// Prints each reply on its own line.
pub struct StdoutSink;

#[async_trait]
impl ReplySink for StdoutSink {
    async fn send(&self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}
