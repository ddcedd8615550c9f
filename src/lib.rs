// src/lib.rs
// =============================================================================
// findlinks: a breadth-first web crawler on top of a reusable traversal engine
//
// Modules:
// - frontier: the generic traversal engine (no I/O, no logging)
// - crawl: the discovery adapter that fetches a page and extracts its links
// - outline: depth-tagged visitor over an HTML element tree
//
// The binary in src/main.rs wires these together behind a clap CLI.
// =============================================================================

pub mod crawl;
pub mod frontier;
pub mod outline;

pub use crawl::{CrawlConfig, CrawlError, CrawlReport, Crawler};
pub use frontier::{
    traverse, traverse_concurrent, AsyncDiscoverer, CancelToken, Completion, Discoverer,
};
