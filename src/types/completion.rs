//! Chat-completion request settings and payload.

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::message::ChatTurn;

/// Sampling settings applied to every completion call.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, PartialEq)]
pub struct CompletionSettings {
    #[builder(into)]
    pub model: String,
    #[builder(default = 250)]
    pub max_tokens: u32,
    #[builder(default = 0.5)]
    pub temperature: f64,
}

/// Body of a single `POST` to the chat-completion endpoint.
///
/// Built fresh for each call and dropped once the request is sent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    #[serde(rename = "messages")]
    pub turns: &'a [ChatTurn],
    pub max_tokens: u32,
    pub temperature: f64,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(turns: &'a [ChatTurn], settings: &'a CompletionSettings) -> Self {
        Self {
            model: &settings.model,
            turns,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}
