// src/crawl/adapter.rs
// =============================================================================
// The Crawler: fetch + parse wrapped up as a discovery function.
//
// Contract with the traversal engine:
// - given a URL, return the URLs it links to
// - never fail: fetch and parse errors are logged, recorded in the report
//   and turned into an empty list
//
// A failed page is still "seen" by the engine, so it is not attempted again
// in the same crawl.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use super::error::CrawlError;
use super::fetch::{build_client, fetch_page};
use super::links::{extract_links, Scope};
use super::report::{CrawlReport, Failure};
use crate::frontier::AsyncDiscoverer;

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default pause after each fetch, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 100;

/// Settings for the discovery adapter.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Polite pause after every fetch, successful or not
    pub delay: Duration,
    /// Only follow links whose host matches one of the seeds
    pub same_host: bool,
    /// Print each URL on stdout as it is visited
    pub echo: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            same_host: false,
            echo: true,
        }
    }
}

/// Discovery adapter turning a page URL into the list of pages it links to.
pub struct Crawler {
    client: Client,
    seeds: HashSet<Url>,
    // Grows when a seed redirects to another host
    scope: RwLock<Scope>,
    delay: Duration,
    echo: bool,
    report: Mutex<CrawlReport>,
}

impl Crawler {
    // Creates a crawler for one crawl session
    //
    // Parameters:
    //   config: timeouts, politeness and scope settings
    //   seeds: the normalized seed URLs (used for --same-host)
    pub fn new(config: &CrawlConfig, seeds: &[Url]) -> Result<Self, CrawlError> {
        let scope = if config.same_host {
            Scope::from_seeds(seeds)
        } else {
            Scope::Any
        };

        Ok(Self {
            client: build_client(config.timeout)?,
            seeds: seeds.iter().cloned().collect(),
            scope: RwLock::new(scope),
            delay: config.delay,
            echo: config.echo,
            report: Mutex::new(CrawlReport::default()),
        })
    }

    // Fetches one page and extracts its in-scope links
    //
    // This is the fallible half of discover(); callers that want the error
    // itself (instead of a log line) can use it directly.
    //
    // A seed that redirects elsewhere (example.com -> www.example.com)
    // brings the host it landed on into scope, otherwise --same-host would
    // drop every link on the page it actually served.
    pub async fn discover_links(&self, url: &Url) -> Result<Vec<Url>, CrawlError> {
        let page = fetch_page(&self.client, url).await?;

        if self.seeds.contains(url) && page.url.host_str() != url.host_str() {
            let admitted = self
                .scope
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .admit(&page.url);
            if admitted {
                info!(seed = %url, landed = %page.url, "Seed redirected, following its new host");
            }
        }

        let scope = self.scope.read().unwrap_or_else(PoisonError::into_inner);
        Ok(extract_links(&page.html, &page.url, &scope))
    }

    pub fn into_report(self) -> CrawlReport {
        self.report
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn record_visit(&self, url: &Url) {
        self.report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .visited
            .push(url.to_string());
    }

    fn record_failure(&self, url: &Url, error: &CrawlError) {
        self.report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .failures
            .push(Failure {
                url: url.to_string(),
                kind: error.kind().to_string(),
                error: error.to_string(),
            });
    }
}

#[async_trait]
impl AsyncDiscoverer<Url> for Crawler {
    async fn discover(&self, url: &Url) -> Vec<Url> {
        // Runs before the first await, so with several fetches in flight the
        // lines still come out in dispatch order
        if self.echo {
            println!("{}", url);
        }
        self.record_visit(url);

        let started = Instant::now();
        let links = match self.discover_links(url).await {
            Ok(links) => {
                debug!(
                    url = %url,
                    links = links.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "page crawled"
                );
                links
            }
            Err(e) => {
                warn!(
                    url = %url,
                    kind = e.kind(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "discovery failed"
                );
                self.record_failure(url, &e);
                Vec::new()
            }
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        links
    }
}
