// src/frontier/mod.rs
// =============================================================================
// Generic breadth-first worklist traversal.
//
// The engine knows nothing about URLs or HTTP. It takes:
// - a list of seed items
// - a discovery capability mapping one item to the items it leads to
//
// and guarantees:
// - each distinct item is handed to discovery at most once per traversal
// - all items at depth k are dispatched before any item at depth k + 1
// - the traversal ends once a round discovers nothing new
//
// Submodules:
// - session: the seen-set and the current/next batches of one traversal
// - sequential: the synchronous driver (traverse)
// - concurrent: the bounded-concurrency driver (traverse_concurrent)
//
// The engine never logs and never interprets errors. Whatever a discovery
// call wants to report, it reports itself.
// =============================================================================

mod concurrent;
mod sequential;
mod session;

pub use concurrent::{traverse_concurrent, AsyncDiscoverer, CancelToken, Completion};
pub use sequential::{traverse, Discoverer};
pub use session::Session;
