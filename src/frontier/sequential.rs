// src/frontier/sequential.rs
// =============================================================================
// The baseline driver: one item at a time, on the calling thread.
//
// How it works:
// 1. Seed the session with the caller's items
// 2. For every unseen item of the current batch, call discover() in order
// 3. Everything discover() returns goes into the next batch
// 4. Swap batches and repeat until a round comes up empty
//
// Because a whole round finishes before the next one starts, every item at
// depth k is dispatched before any item at depth k + 1.
// =============================================================================

use std::hash::Hash;

use super::session::Session;

/// A synchronous discovery capability: maps an item to the items it leads to.
///
/// Implementations may return items that were already seen (even `item`
/// itself); the engine filters them. Closures of the form
/// `FnMut(&T) -> Vec<T>` implement this trait directly.
pub trait Discoverer<T> {
    /// Processes `item` and returns the items discovered from it.
    fn discover(&mut self, item: &T) -> Vec<T>;
}

impl<T, F> Discoverer<T> for F
where
    F: FnMut(&T) -> Vec<T>,
{
    fn discover(&mut self, item: &T) -> Vec<T> {
        self(item)
    }
}

// Runs a breadth-first traversal from `seeds`, calling `discoverer` exactly
// once for every distinct item reachable from them
//
// Parameters:
//   discoverer: anything implementing Discoverer (a closure works)
//   seeds: the starting items; may be empty or contain duplicates
//
// A panic inside discover() unwinds straight out of this function and the
// session is dropped with it.
pub fn traverse<T, D>(mut discoverer: D, seeds: impl IntoIterator<Item = T>)
where
    T: Eq + Hash + Clone,
    D: Discoverer<T>,
{
    let mut session = Session::new(seeds);

    while session.has_pending() {
        for item in session.begin_round() {
            let discovered = discoverer.discover(&item);
            session.extend_next(discovered);
        }
        session.advance();
    }
}
