//! Outbound delivery: chunking, part headers, and the platform sink seam.

use std::time::Duration;

use async_trait::async_trait;

use crate::chunk;
use crate::error::Result;

/// Room left in each message for a part header.
pub const HEADER_ALLOWANCE: usize = 50;

/// Where replies go: a chat channel, a test recorder, a terminal.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

/// Split `text` at `limit` and send each chunk in order.
///
/// Sleeps `delay` between sends, not after the last. Stops at the first
/// failed send; chunks already sent stay sent. Returns how many went out.
pub async fn send_chunked(
    sink: &dyn ReplySink,
    text: &str,
    limit: usize,
    delay: Duration,
) -> Result<usize> {
    let chunks = chunk::split(text, limit);
    send_all(sink, chunks, delay).await
}

/// Send pre-formatted messages in order with `delay` between them.
pub async fn send_all<'a, I>(sink: &dyn ReplySink, messages: I, delay: Duration) -> Result<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sent = 0;
    for message in messages {
        if sent > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        sink.send(message).await?;
        sent += 1;
    }
    Ok(sent)
}

/// Split `text` so that `"**{title} (Part i/n)**\n" + chunk` fits in `limit`.
pub fn with_part_headers(title: &str, text: &str, limit: usize) -> Vec<String> {
    let body_len = limit.saturating_sub(HEADER_ALLOWANCE).max(1);
    let chunks = chunk::split(text, body_len);
    let total = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| format!("**{title} (Part {}/{total})**\n{chunk}", i + 1))
        .collect()
}
