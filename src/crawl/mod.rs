// src/crawl/mod.rs
// =============================================================================
// This module is the discovery adapter: it binds the generic traversal
// engine to the web.
//
// For every URL the engine hands over, the adapter:
// - prints the URL (the visible output of a crawl)
// - fetches the page and extracts its links
// - on failure, logs a warning and returns no links, so the crawl goes on
//
// Submodules:
// - adapter: the Crawler type implementing AsyncDiscoverer<Url>
// - fetch: HTTP client setup and single-page fetch
// - links: href extraction, resolution and scope filtering
// - report: the visited/failed record of one crawl
// - error: CrawlError
// =============================================================================

mod adapter;
mod error;
mod fetch;
mod links;
mod report;

pub use adapter::{CrawlConfig, Crawler, DEFAULT_DELAY_MS, DEFAULT_TIMEOUT_SECS};
pub use error::CrawlError;
pub use fetch::{build_client, fetch_page, is_html, FetchedPage};
pub use links::{extract_links, normalize_seed, resolve_link, Scope};
pub use report::{CrawlReport, Failure};
