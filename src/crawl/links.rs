// src/crawl/links.rs
// =============================================================================
// This module turns a fetched HTML page into the list of pages it links to.
//
// We use the `scraper` crate to find every <a href> element, and the `url`
// crate to:
// - Resolve relative hrefs against the page's own URL
// - Drop the #fragment part, so "page#top" and "page" are the same item
//
// Only http/https links survive. An optional Scope narrows the result down
// to the hosts the crawl started from.
// =============================================================================

use std::collections::HashSet;
use std::sync::OnceLock;

use scraper::{Html, Selector};
use url::Url;

/// Which discovered links are handed back to the traversal.
#[derive(Debug, Clone, Default)]
pub enum Scope {
    /// Follow every http/https link.
    #[default]
    Any,
    /// Follow only links whose host is in the set.
    Hosts(HashSet<String>),
}

impl Scope {
    // Builds a host-restricted scope from the seed URLs
    //
    // Seeds without a host (which can't happen for http/https) are ignored.
    pub fn from_seeds<'a>(seeds: impl IntoIterator<Item = &'a Url>) -> Self {
        let hosts = seeds
            .into_iter()
            .filter_map(|url| url.host_str().map(str::to_owned))
            .collect();
        Scope::Hosts(hosts)
    }

    // Adds the host `url` lives on to a host-restricted scope
    //
    // Returns true when the host was new. An unrestricted scope is left
    // alone.
    pub fn admit(&mut self, url: &Url) -> bool {
        match (self, url.host_str()) {
            (Scope::Hosts(hosts), Some(host)) => hosts.insert(host.to_owned()),
            _ => false,
        }
    }

    pub fn allows(&self, url: &Url) -> bool {
        match self {
            Scope::Any => true,
            Scope::Hosts(hosts) => url.host_str().is_some_and(|host| hosts.contains(host)),
        }
    }
}

fn anchor_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    // The selector is a constant and known to be valid
    SELECTOR.get_or_init(|| Selector::parse("a[href]").expect("a[href] is a valid selector"))
}

// Extracts all followable links from an HTML document
//
// Parameters:
//   html: the HTML content of the page
//   page_url: the URL the page was actually served from (after redirects)
//   scope: which hosts to keep
//
// Returns: absolute, fragment-free URLs in document order. Duplicates are
// kept; the traversal engine takes care of them.
pub fn extract_links(html: &str, page_url: &Url, scope: &Scope) -> Vec<Url> {
    let document = Html::parse_document(html);

    document
        .select(anchor_selector())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(page_url, href))
        .filter(|url| scope.allows(url))
        .collect()
}

// Resolves an href to an absolute crawlable URL
//
// Returns None for:
// - in-page anchors (#section)
// - mailto:, tel:, javascript: and other non-http schemes
// - hrefs that don't parse at all
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    // join() handles absolute hrefs too: they simply replace the base
    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}

// Normalizes a seed URL the same way discovered links are normalized
//
// Returns None when the input is not an absolute http/https URL.
pub fn normalize_seed(raw: &str) -> Option<Url> {
    let mut url = Url::parse(raw.trim()).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}
