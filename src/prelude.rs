//! Convenience re-exports for common use.

pub use crate::config::RelayConfig;
pub use crate::error::{RelayError, Result};
pub use crate::fetch::PageFetcher;
pub use crate::history::HistoryStore;
pub use crate::provider::{CompletionBackend, CompletionResult, InferenceClient};
pub use crate::relay::{Relay, ReplySink};
pub use crate::types::{ChatTurn, CompletionSettings, Role};
