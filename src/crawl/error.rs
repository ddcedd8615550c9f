// src/crawl/error.rs
// =============================================================================
// Errors that can happen while turning one URL into its list of links.
//
// None of these ever reach the traversal engine: the adapter logs them,
// records them in the CrawlReport and carries on with an empty link list.
// =============================================================================

use thiserror::Error;

/// Why discovering links from a single page failed.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// Connection, DNS or TLS level failure.
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the client timeout.
    #[error("timeout fetching {url}")]
    Timeout { url: String },

    /// Non-success response status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// The response was not an HTML document, so it has no links to follow.
    #[error("{url} is not HTML (content type: {content_type})")]
    NotHtml { url: String, content_type: String },

    /// The body could not be read or decoded.
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl CrawlError {
    // Maps a reqwest send() error, pulling timeouts out into their own variant
    pub(crate) fn from_send(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            CrawlError::Timeout {
                url: url.to_string(),
            }
        } else {
            CrawlError::Network {
                url: url.to_string(),
                source,
            }
        }
    }

    /// Short machine-friendly label used in logs and the JSON report.
    pub fn kind(&self) -> &'static str {
        match self {
            CrawlError::Client { .. } => "client",
            CrawlError::Network { .. } => "network",
            CrawlError::Timeout { .. } => "timeout",
            CrawlError::HttpStatus { .. } => "http_status",
            CrawlError::NotHtml { .. } => "not_html",
            CrawlError::Body { .. } => "body",
        }
    }
}
