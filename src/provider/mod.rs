//! Inference backend trait and the OpenAI-compatible HTTP client.

pub mod http;
pub mod openai_compatible;

pub use openai_compatible::InferenceClient;

use async_trait::async_trait;

use crate::error::RelayError;
use crate::types::{ChatTurn, CompletionSettings};

/// Reply text on success, a typed failure otherwise.
pub type CompletionResult = Result<String, RelayError>;

/// Anything that can turn a list of chat turns into a reply.
///
/// Implementations make at most one attempt per call and return failures as
/// values; they never panic on a bad response.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Where requests go, for log output.
    fn endpoint(&self) -> &str;

    /// Send `turns` (system turn first, if any) and return the reply text.
    async fn complete(&self, turns: &[ChatTurn], settings: &CompletionSettings)
        -> CompletionResult;
}
