// src/crawl/fetch.rs
// =============================================================================
// This module fetches a single page over HTTP.
//
// A fetch succeeds only when:
// - the request completes within the client timeout
// - the server answers with a 2xx status (redirects are followed)
// - the response is an HTML document
//
// Everything else becomes a CrawlError. Retrying is not done here; a page
// that fails stays failed for the rest of the crawl.
// =============================================================================

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use super::error::CrawlError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A successfully fetched HTML page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where the page was served from after following redirects. Relative
    /// links resolve against this, not against the requested URL.
    pub url: Url,
    pub html: String,
}

// Creates the HTTP client shared by every fetch of one crawl
//
// reqwest's Client is a connection pool behind an Arc, so cloning it is
// cheap and all concurrent fetches reuse the same connections.
pub fn build_client(timeout: Duration) -> Result<Client, CrawlError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|source| CrawlError::Client { source })
}

// Fetches a web page and returns its HTML content
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, CrawlError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| CrawlError::from_send(url.as_str(), e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    if !is_html(content_type.as_deref()) {
        return Err(CrawlError::NotHtml {
            url: url.to_string(),
            content_type: content_type.unwrap_or_default(),
        });
    }

    let final_url = response.url().clone();
    let html = response.text().await.map_err(|source| CrawlError::Body {
        url: url.to_string(),
        source,
    })?;

    Ok(FetchedPage {
        url: final_url,
        html,
    })
}

// Decides whether a Content-Type header describes an HTML document
//
// A missing header is given the benefit of the doubt; plenty of small
// servers never send one for their pages.
pub fn is_html(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "text/html" || mime == "application/xhtml+xml"
}
