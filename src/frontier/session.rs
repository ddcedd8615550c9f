// src/frontier/session.rs
// =============================================================================
// The state of a single traversal: the seen-set plus the two frontier batches.
//
// A Session is created when a traversal starts and dropped when it ends.
// Nothing in here is global, so two traversals running side by side never
// see each other's items.
//
// Round structure:
// 1. begin_round() filters the current batch against the seen-set and marks
//    every fresh item as seen (in input order)
// 2. the driver dispatches those fresh items and pushes every result into
//    the next batch, seen or not
// 3. advance() swaps the next batch in as the new current batch
// =============================================================================

use std::collections::HashSet;
use std::hash::Hash;

/// Ephemeral aggregate of {seen, current batch, next batch}.
#[derive(Debug)]
pub struct Session<T> {
    seen: HashSet<T>,
    current: Vec<T>,
    next: Vec<T>,
}

impl<T> Session<T>
where
    T: Eq + Hash + Clone,
{
    // Starts a session whose first round is the seed list
    //
    // Duplicates in the seeds are fine; begin_round() drops them.
    pub fn new(seeds: impl IntoIterator<Item = T>) -> Self {
        Self {
            seen: HashSet::new(),
            current: seeds.into_iter().collect(),
            next: Vec::new(),
        }
    }

    /// Returns true while there is a batch left to process.
    pub fn has_pending(&self) -> bool {
        !self.current.is_empty()
    }

    // Drains the current batch and returns the items that have never been
    // dispatched, marking each of them as seen
    //
    // The check and the mark are one HashSet::insert call, so an item can't
    // slip through twice even when it appears several times in one batch.
    pub fn begin_round(&mut self) -> Vec<T> {
        let mut fresh = Vec::with_capacity(self.current.len());
        for item in self.current.drain(..) {
            if self.seen.insert(item.clone()) {
                fresh.push(item);
            }
        }
        fresh
    }

    // Appends a discovery result to the next batch
    //
    // No filtering here: dedup happens at the start of the following round.
    pub fn extend_next(&mut self, discovered: impl IntoIterator<Item = T>) {
        self.next.extend(discovered);
    }

    // Promotes the next batch to current
    //
    // The (already drained) current buffer is reused as the new next batch
    // so its allocation survives across rounds.
    pub fn advance(&mut self) {
        self.current.clear();
        std::mem::swap(&mut self.current, &mut self.next);
    }

    #[cfg(test)]
    fn seen_len(&self) -> usize {
        self.seen.len()
    }

    #[cfg(test)]
    fn is_seen(&self, item: &T) -> bool {
        self.seen.contains(item)
    }
}
