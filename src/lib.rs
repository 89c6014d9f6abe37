//! relaybot — chat relay to a local language model.
//!
//! Keeps a bounded per-user conversation window, forwards each message to an
//! OpenAI-compatible chat-completion endpoint, and splits replies to fit the
//! chat platform's message limit. Commands fetch web pages, score their
//! sentiment, and ask the model for a summary.
//!
//! # Quick Start
//!
//! ```no_run
//! use relaybot::config::RelayConfig;
//! use relaybot::relay::Relay;
//!
//! # fn example() -> relaybot::error::Result<()> {
//! let config = RelayConfig::load(None)?;
//! let relay = Relay::from_config(config)?;
//! println!("{:?}", relay.config());
//! # Ok(())
//! # }
//! ```

pub mod chunk;
pub mod config;
pub mod error;
pub mod fetch;
pub mod history;
pub mod prelude;
pub mod provider;
pub mod relay;
pub mod sentiment;
pub mod types;

#[cfg(feature = "discord")]
pub mod discord;

#[cfg(feature = "cli")]
pub mod cli;
