// src/crawl/report.rs
// =============================================================================
// What a crawl leaves behind: the pages it visited and the ones that failed.
//
// The traversal engine returns nothing, so the adapter keeps this record on
// the side. It is printed as JSON with --json and drives the exit code.
// =============================================================================

use serde::{Deserialize, Serialize};

/// A page whose links could not be discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub url: String,
    /// Short label such as "timeout" or "http_status"
    pub kind: String,
    pub error: String,
}

/// Pages visited by one crawl, in dispatch order, plus the failures among them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    pub visited: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<Failure>,
}

impl CrawlReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Pages that were visited and yielded their links.
    pub fn succeeded(&self) -> usize {
        self.visited.len().saturating_sub(self.failures.len())
    }
}
