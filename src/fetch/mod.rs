//! Web page retrieval and text extraction.

pub mod html;

pub use html::html_to_text;

use tracing::debug;

use crate::error::RelayError;
use crate::provider::http::status_error;

/// Visible page text on success, a typed failure otherwise.
pub type FetchResult = Result<String, RelayError>;

/// Prefix `https://` to a URL that carries no `http://` or `https://` scheme.
///
/// Plain `http://` is never added; a caller that wants it must spell it out.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Fetches pages over the shared pooled client.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET `url` once and return its visible text.
    ///
    /// Non-2xx responses map to [`RelayError::Status`]; connection, DNS, TLS
    /// and timeout failures map to [`RelayError::Transport`] with the reqwest
    /// error as source.
    pub async fn fetch_text(&self, url: &str) -> FetchResult {
        if url.trim().is_empty() {
            return Err(RelayError::Validation("URL is empty".into()));
        }
        let url = normalize_url(url);
        debug!(url = url.as_str(), "fetching page");

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }

        let body = resp.text().await?;
        let text = html_to_text(&body);
        debug!(
            url = url.as_str(),
            html_bytes = body.len(),
            text_bytes = text.len(),
            "page fetched"
        );
        Ok(text)
    }
}
