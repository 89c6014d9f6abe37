//! Platform-agnostic message and command handlers.
//!
//! A [`Relay`] turns one inbound message into zero or more outbound messages
//! on a [`ReplySink`]. Every failure from the inference endpoint or a page
//! fetch is logged and answered with a fixed reply; only a failing sink is
//! returned to the caller.

pub mod command;
pub mod dispatch;

pub use command::{Command, CommandName, Invocation};
pub use dispatch::{send_all, send_chunked, with_part_headers, ReplySink};

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::chunk::truncate_chars;
use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::fetch::PageFetcher;
use crate::history::HistoryStore;
use crate::provider::http::build_client;
use crate::provider::{CompletionBackend, InferenceClient};
use crate::sentiment;
use crate::types::{ChatTurn, CompletionSettings, Role};

pub const CHAT_FAILURE_REPLY: &str = "Error: Unable to process the request. Please try again later.";
pub const ANALYSIS_FAILURE_REPLY: &str = "Error: AI request failed.";
pub const PONG_REPLY: &str = "Pong!";
pub const CLEARED_REPLY: &str = "Your chat history has been cleared.";
pub const MISSING_ARGUMENT_REPLY: &str = "Please provide the required arguments for this command.";
pub const UNKNOWN_COMMAND_REPLY: &str = "That command does not exist.";

/// System turn for page summaries.
pub const ANALYZE_PROMPT: &str = "Analyze the following webpage and summarize it:";
/// Characters of page text sent along with [`ANALYZE_PROMPT`].
pub const ANALYZE_INPUT_CHARS: usize = 4000;

/// Owns the shared history table and the outbound clients.
pub struct Relay {
    history: HistoryStore,
    backend: Arc<dyn CompletionBackend>,
    fetcher: PageFetcher,
    settings: CompletionSettings,
    config: RelayConfig,
}

impl Relay {
    pub fn new(
        config: RelayConfig,
        backend: Arc<dyn CompletionBackend>,
        fetcher: PageFetcher,
    ) -> Self {
        Self {
            history: HistoryStore::with_capacity(config.history_capacity),
            settings: config.completion_settings(),
            backend,
            fetcher,
            config,
        }
    }

    /// Build the pooled HTTP client and both outbound clients from `config`.
    pub fn from_config(config: RelayConfig) -> Result<Self> {
        config.validate()?;
        let client = build_client(config.request_timeout())?;
        let backend = Arc::new(InferenceClient::new(
            client.clone(),
            config.inference_url.clone(),
            config.api_key.clone(),
        ));
        Ok(Self::new(config, backend, PageFetcher::new(client)))
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Route a raw inbound message to the chat path or a command.
    ///
    /// Prefixed text runs only as a command: it is not sent to the model and
    /// not recorded in history, unlike bots that feed every message to both.
    pub async fn handle_incoming(
        &self,
        user_id: &str,
        content: &str,
        sink: &dyn ReplySink,
    ) -> Result<()> {
        let span = info_span!("message", request_id = %Uuid::new_v4(), user = user_id);
        async {
            match command::parse(content, &self.config.command_prefix) {
                Some(Invocation::Run(command)) => self.handle_command(user_id, command, sink).await,
                Some(Invocation::MissingArgument(name)) => {
                    info!(command = %name, "command missing argument");
                    sink.send(MISSING_ARGUMENT_REPLY).await
                }
                Some(Invocation::Unknown(name)) => {
                    info!(command = name.as_str(), "unknown command");
                    sink.send(UNKNOWN_COMMAND_REPLY).await
                }
                None => self.handle_message(user_id, content, sink).await,
            }
        }
        .instrument(span)
        .await
    }

    /// Relay a chat message to the model and send the reply back.
    ///
    /// The user turn is recorded before the request, so it stays in history
    /// even when the request fails.
    pub async fn handle_message(
        &self,
        user_id: &str,
        content: &str,
        sink: &dyn ReplySink,
    ) -> Result<()> {
        let window = self.history.record_and_snapshot(user_id, Role::User, content);
        let mut turns = Vec::with_capacity(window.len() + 1);
        turns.push(ChatTurn::system(self.config.system_prompt.as_str()));
        turns.extend(window);

        let reply = match self.backend.complete(&turns, &self.settings).await {
            Ok(text) => {
                if self.config.remember_replies {
                    self.history.record(user_id, Role::Assistant, text.as_str());
                }
                text
            }
            Err(e) => {
                warn!(
                    command = "chat",
                    endpoint = self.backend.endpoint(),
                    category = %e.category(),
                    error = %e,
                    "completion request failed"
                );
                CHAT_FAILURE_REPLY.to_string()
            }
        };

        if reply.is_empty() {
            warn!(command = "chat", "model returned an empty reply; nothing sent");
            return Ok(());
        }
        send_chunked(sink, &reply, self.config.message_limit, self.config.chunk_delay()).await?;
        Ok(())
    }

    /// Run a parsed command.
    pub async fn handle_command(
        &self,
        user_id: &str,
        command: Command,
        sink: &dyn ReplySink,
    ) -> Result<()> {
        info!(command = %command.name(), "running command");
        match command {
            Command::Ping => sink.send(PONG_REPLY).await,
            Command::Clear => {
                self.history.clear(user_id);
                sink.send(CLEARED_REPLY).await
            }
            Command::WebScrape { url } => self.web_scrape(&url, sink).await,
            Command::Analyze { url } => self.analyze(&url, sink).await,
        }
    }

    async fn web_scrape(&self, url: &str, sink: &dyn ReplySink) -> Result<()> {
        let text = match self.fetcher.fetch_text(url).await {
            Ok(text) => text,
            Err(e) => return self.report_fetch_failure(CommandName::WebScrape, url, e, sink).await,
        };
        let parts = with_part_headers("Page Content", &text, self.config.message_limit);
        send_all(sink, parts.iter().map(String::as_str), self.config.chunk_delay()).await?;
        Ok(())
    }

    async fn analyze(&self, url: &str, sink: &dyn ReplySink) -> Result<()> {
        let text = match self.fetcher.fetch_text(url).await {
            Ok(text) => text,
            Err(e) => return self.report_fetch_failure(CommandName::Analyze, url, e, sink).await,
        };

        let compound = sentiment::score(&text);
        sink.send(&format!("The sentiment of the page is `{compound}`."))
            .await?;

        let turns = [
            ChatTurn::system(ANALYZE_PROMPT),
            ChatTurn::user(truncate_chars(&text, ANALYZE_INPUT_CHARS)),
        ];
        let summary = match self.backend.complete(&turns, &self.settings).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(
                    command = %CommandName::Analyze,
                    url,
                    category = %e.category(),
                    error = %e,
                    "summary request failed"
                );
                ANALYSIS_FAILURE_REPLY.to_string()
            }
        };

        let parts = with_part_headers("AI Analysis", &summary, self.config.message_limit);
        send_all(sink, parts.iter().map(String::as_str), self.config.chunk_delay()).await?;
        Ok(())
    }

    async fn report_fetch_failure(
        &self,
        command: CommandName,
        url: &str,
        error: RelayError,
        sink: &dyn ReplySink,
    ) -> Result<()> {
        warn!(
            command = %command,
            url,
            category = %error.category(),
            error = %error,
            "page fetch failed"
        );
        sink.send(&fetch_failure_reply(&error)).await
    }
}

/// User-facing text for a failed page fetch.
pub fn fetch_failure_reply(error: &RelayError) -> String {
    match error {
        RelayError::Status { status, .. } => {
            format!("Failed to retrieve the page. Status code: {status}")
        }
        RelayError::Transport(e) => format!("An error occurred: {e}"),
        RelayError::Validation(_) => MISSING_ARGUMENT_REPLY.to_string(),
        other => format!("An unexpected error occurred: {other}"),
    }
}
