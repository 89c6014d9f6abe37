//! Client for any OpenAI-compatible `/chat/completions` endpoint
//! (Ollama, LM Studio, llama.cpp server, vLLM).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::RelayError;
use crate::types::{ChatTurn, CompletionRequest, CompletionSettings};

use super::http::{json_headers, status_error};
use super::{CompletionBackend, CompletionResult};

/// Default local endpoint (Ollama's OpenAI-compatible route).
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/v1/chat/completions";

pub struct InferenceClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl InferenceClient {
    /// `url` is the full completion URL, not a base URL.
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionBackend for InferenceClient {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn complete(
        &self,
        turns: &[ChatTurn],
        settings: &CompletionSettings,
    ) -> CompletionResult {
        let body = CompletionRequest::new(turns, settings);

        debug!(
            model = settings.model.as_str(),
            turns = turns.len(),
            url = self.url.as_str(),
            "chat completion"
        );

        let resp = self
            .client
            .post(&self.url)
            .headers(json_headers(self.api_key.as_deref()))
            .json(&body)
            .send()
            .await?;

        if resp.status().as_u16() != 200 {
            return Err(status_error(resp).await);
        }

        let text = resp.text().await?;
        parse_reply(&text)
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Pull `choices[0].message.content` out of a response body.
fn parse_reply(body: &str) -> CompletionResult {
    let data: ChatResponse = serde_json::from_str(body)
        .map_err(|e| RelayError::MalformedResponse(format!("invalid completion body: {e}")))?;
    let choice = data
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| RelayError::MalformedResponse("no choices in completion response".into()))?;
    choice
        .message
        .content
        .ok_or_else(|| RelayError::MalformedResponse("first choice has no message content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_choice_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}},{"message":{"content":"no"}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "hi");
    }

    #[test]
    fn empty_choices_is_malformed() {
        let err = parse_reply(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, RelayError::MalformedResponse(m) if m.contains("no choices")));
    }

    #[test]
    fn null_content_is_malformed() {
        let err = parse_reply(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert!(matches!(err, RelayError::MalformedResponse(_)));
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(
            parse_reply("<html>oops</html>"),
            Err(RelayError::MalformedResponse(_))
        ));
    }
}
