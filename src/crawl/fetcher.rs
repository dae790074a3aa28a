use std::time::Duration;

use reqwest::Client;
use url::Url;

/// Per-URL fetch failures. All of these are recoverable at the session
/// level: the URL is marked visited and the crawl moves on.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("failed to read body: {0}")]
    Body(String),
}

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub status: u16,
    pub header_text: String,
    pub body: String,
}

impl Page {
    /// The snapshot the classifier runs over: raw header text concatenated
    /// with the body text.
    pub fn classification_text(&self) -> String {
        format!("{}\n{}", self.header_text, self.body)
    }
}

/// Single-GET fetcher with a bounded timeout and a browser-like User-Agent.
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    pub fn new(timeout_secs: u64) -> Self {
        let timeout = Duration::from_secs(timeout_secs.max(1));
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .gzip(true)
            .brotli(true)
            .use_rustls_tls()
            // Follow redirects only while the host stays the same; a
            // cross-origin redirect surfaces as its 3xx status instead.
            .redirect(reqwest::redirect::Policy::custom(|attempt| {
                if attempt.previous().len() > 5 {
                    return attempt.error("too many redirects");
                }
                let first_host = attempt
                    .previous()
                    .first()
                    .and_then(|u| u.host_str().map(str::to_string));
                let next_host = attempt.url().host_str().map(str::to_string);
                match (first_host, next_host) {
                    (Some(a), Some(b)) if a == b => attempt.follow(),
                    _ => attempt.stop(),
                }
            }))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, timeout }
    }

    /// Issue one GET. A 2xx response with a readable body is the only
    /// success; everything else is normalized into a `FetchError`.
    pub async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        let send = self.client.get(url.clone()).send();
        let response = match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(r)) => r,
            Ok(Err(e)) if e.is_timeout() => return Err(FetchError::Timeout),
            Ok(Err(e)) => return Err(FetchError::Transport(e.to_string())),
            Err(_) => return Err(FetchError::Timeout),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().clone();
        let header_text = response
            .headers()
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("")))
            .collect::<Vec<_>>()
            .join("\n");

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(Page {
            url: final_url,
            status: status.as_u16(),
            header_text,
            body,
        })
    }
}
