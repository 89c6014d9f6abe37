//! Configuration system (layered: defaults < config file < env < code).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{RelayError, Result};
use crate::history::DEFAULT_CAPACITY;
use crate::provider::openai_compatible::DEFAULT_ENDPOINT;
use crate::types::CompletionSettings;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "relaybot.toml";

/// Longest message the reference chat platform accepts.
pub const DEFAULT_MESSAGE_LIMIT: usize = 2000;

/// Runtime configuration for the relay and its transports.
#[derive(Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    pub discord_token: Option<String>,
    pub inference_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub history_capacity: usize,
    pub message_limit: usize,
    pub chunk_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub remember_replies: bool,
    pub command_prefix: String,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("discord_token", &self.discord_token.as_ref().map(|_| ".."))
            .field("inference_url", &self.inference_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("system_prompt", &self.system_prompt)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("history_capacity", &self.history_capacity)
            .field("message_limit", &self.message_limit)
            .field("chunk_delay_ms", &self.chunk_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("remember_replies", &self.remember_replies)
            .field("command_prefix", &self.command_prefix)
            .finish()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            discord_token: None,
            inference_url: DEFAULT_ENDPOINT.to_string(),
            model: "dolphin-phi".to_string(),
            api_key: None,
            system_prompt: String::new(),
            max_tokens: 250,
            temperature: 0.5,
            history_capacity: DEFAULT_CAPACITY,
            message_limit: DEFAULT_MESSAGE_LIMIT,
            chunk_delay_ms: 1000,
            request_timeout_secs: 120,
            remember_replies: false,
            command_prefix: "!".to_string(),
        }
    }
}

impl RelayConfig {
    /// Load the full layered configuration.
    ///
    /// An explicit `path` must exist. Without one, the default config file is
    /// read only if present. A `.env` file in the working directory is loaded
    /// into the process environment first.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with the keys present in a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Overlay values from process environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DISCORD_TOKEN") {
            self.discord_token = Some(v);
        }
        if let Some(v) = lookup("INFERENCE_URL") {
            self.inference_url = v;
        }
        if let Some(v) = lookup("INFERENCE_MODEL") {
            self.model = v;
        }
        if let Some(v) = lookup("INFERENCE_API_KEY") {
            self.api_key = Some(v);
        }
        if let Some(v) = lookup("SYSTEM_PROMPT") {
            self.system_prompt = v;
        }
        parse_into(&lookup, "MAX_TOKENS", &mut self.max_tokens)?;
        parse_into(&lookup, "TEMPERATURE", &mut self.temperature)?;
        parse_into(&lookup, "HISTORY_CAPACITY", &mut self.history_capacity)?;
        parse_into(&lookup, "CHUNK_DELAY_MS", &mut self.chunk_delay_ms)?;
        parse_into(&lookup, "REQUEST_TIMEOUT_SECS", &mut self.request_timeout_secs)?;
        parse_into(&lookup, "REMEMBER_REPLIES", &mut self.remember_replies)?;
        Ok(())
    }

    /// Reject values the relay cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.inference_url.trim().is_empty() {
            return Err(RelayError::Configuration("inference_url is empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(RelayError::Configuration("model is empty".into()));
        }
        if self.history_capacity == 0 {
            return Err(RelayError::Configuration(
                "history_capacity must be at least 1".into(),
            ));
        }
        if self.message_limit == 0 {
            return Err(RelayError::Configuration(
                "message_limit must be at least 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(RelayError::Configuration(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }
        if self.command_prefix.is_empty() {
            return Err(RelayError::Configuration("command_prefix is empty".into()));
        }
        Ok(())
    }

    /// The bot token, or a configuration error if none was supplied.
    pub fn require_discord_token(&self) -> Result<&str> {
        self.discord_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| RelayError::Configuration("Missing DISCORD_TOKEN".into()))
    }

    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings::builder()
            .model(self.model.clone())
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()
    }

    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `<config dir>/relaybot.toml` for the current platform, if resolvable.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "relaybot")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn parse_into<T, F>(lookup: &F, key: &str, slot: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse()
            .map_err(|e| RelayError::Configuration(format!("{key}={raw:?}: {e}")))?;
    }
    Ok(())
}
