//! Shared test helpers: scripted backend and recording sink.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use relaybot::config::RelayConfig;
use relaybot::error::{RelayError, Result};
use relaybot::fetch::PageFetcher;
use relaybot::provider::{CompletionBackend, CompletionResult};
use relaybot::relay::{Relay, ReplySink};
use relaybot::types::{ChatTurn, CompletionSettings};

/// A backend that returns queued results and records every request.
pub struct ScriptedBackend {
    replies: Mutex<Vec<CompletionResult>>,
    requests: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply.
    pub fn queue_reply(&self, text: &str) {
        self.replies.lock().unwrap().push(Ok(text.to_string()));
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: RelayError) {
        self.replies.lock().unwrap().push(Err(error));
    }

    /// Every turn list sent so far, oldest first.
    pub fn requests(&self) -> Vec<Vec<ChatTurn>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<Vec<ChatTurn>> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    fn endpoint(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        turns: &[ChatTurn],
        _settings: &CompletionSettings,
    ) -> CompletionResult {
        self.requests.lock().unwrap().push(turns.to_vec());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok("Mock response".to_string());
        }
        replies.remove(0)
    }
}

/// A sink that keeps every message it is given.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<String>>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose sends fail once `n` messages have gone through.
    pub fn failing_after(n: usize) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_after: Some(n),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send(&self, text: &str) -> Result<()> {
        let mut sent = self.sent.lock().unwrap();
        if self.fail_after.is_some_and(|n| sent.len() >= n) {
            return Err(RelayError::Platform("channel closed".into()));
        }
        sent.push(text.to_string());
        Ok(())
    }
}

/// Config with no delay between chunks.
pub fn test_config() -> RelayConfig {
    RelayConfig {
        chunk_delay_ms: 0,
        request_timeout_secs: 5,
        ..Default::default()
    }
}

/// A relay over a scripted backend; page fetches use a plain client.
pub fn scripted_relay(config: RelayConfig) -> (Relay, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::new());
    let relay = Relay::new(
        config,
        backend.clone(),
        PageFetcher::new(reqwest::Client::new()),
    );
    (relay, backend)
}
