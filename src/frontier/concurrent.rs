// src/frontier/concurrent.rs
// =============================================================================
// The bounded-concurrency driver.
//
// Within a round, up to `limit` discovery calls are in flight at once. The
// round only ends when every call has returned (round barrier), so the
// breadth-first depth order of the sequential driver still holds.
//
// Shared state:
// - The Session is owned by the drive loop alone. Seen checks happen before
//   anything is dispatched, so dedup stays atomic per item.
// - Discovery futures never touch the session; they only hand back data,
//   and the loop folds the results in input order.
//
// Cancellation:
// - Once the CancelToken fires, no new discovery call starts
// - Calls already in flight run to completion, then the session is dropped
// =============================================================================

use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future;
use futures::stream::{self, StreamExt};

use super::session::Session;

/// An asynchronous discovery capability, shared by reference between
/// concurrent calls.
#[async_trait]
pub trait AsyncDiscoverer<T>: Send + Sync {
    /// Processes `item` and returns the items discovered from it.
    async fn discover(&self, item: &T) -> Vec<T>;
}

/// Cooperative cancellation flag for a running traversal.
///
/// Clones share the same flag, so one clone can be handed to a signal
/// handler while the driver polls another.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops further dispatch. Safe to call more than once.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// How a concurrent traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The frontier emptied out.
    Drained,
    /// The token fired; in-flight calls were allowed to finish first.
    Cancelled,
}

// Runs a breadth-first traversal with up to `limit` discovery calls in flight
//
// Parameters:
//   discoverer: shared discovery capability
//   seeds: the starting items; may be empty or contain duplicates
//   limit: maximum concurrent discover() calls per round (0 is treated as 1)
//   cancel: token checked before each dispatch
//
// Results are collected with an ordered buffer, so for the same graph the
// dispatch order matches traverse() exactly; only the timing overlaps.
pub async fn traverse_concurrent<T, D>(
    discoverer: &D,
    seeds: impl IntoIterator<Item = T>,
    limit: usize,
    cancel: &CancelToken,
) -> Completion
where
    T: Eq + Hash + Clone + Send + Sync,
    D: AsyncDiscoverer<T> + ?Sized,
{
    let limit = limit.max(1);
    let mut session = Session::new(seeds);

    while session.has_pending() {
        if cancel.is_cancelled() {
            return Completion::Cancelled;
        }

        let fresh = session.begin_round();

        // take_while is consulted each time the buffer wants a new item, so
        // a cancellation stops new dispatch while queued futures still drain
        let results: Vec<Vec<T>> = stream::iter(fresh.iter())
            .take_while(|_| future::ready(!cancel.is_cancelled()))
            .map(|item| discoverer.discover(item))
            .buffered(limit)
            .collect()
            .await;

        if cancel.is_cancelled() {
            return Completion::Cancelled;
        }

        for discovered in results {
            session.extend_next(discovered);
        }
        session.advance();
    }

    Completion::Drained
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffered() vs buffer_unordered()
//    - Both keep up to N futures running at once
//    - buffered(N) yields results in the order the futures were created
//    - buffer_unordered(N) yields them as they finish
//    - We need the ordered one so the next batch is identical to the
//      sequential driver's, whatever order the pages happen to load in
//
// 2. Why #[async_trait]?
//    - The macro rewrites `async fn discover` into a method returning a
//      boxed, Send future
//    - That lets the driver take `&D` where D: ?Sized, so a
//      `&dyn AsyncDiscoverer<T>` works too
//
// 3. What is AtomicBool?
//    - A bool that many threads can read and write without a Mutex
//    - CancelToken wraps one in an Arc so every clone sees the same flag
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Start(&'static str),
        End(&'static str),
    }

    // Discoverer over a fixed graph that records start/end events and the
    // peak number of concurrent calls
    struct Recorder {
        adjacency: HashMap<&'static str, Vec<&'static str>>,
        delays: HashMap<&'static str, u64>,
        events: Mutex<Vec<Event>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        cancel_on: Option<(&'static str, CancelToken)>,
    }

    impl Recorder {
        fn new(edges: &[(&'static str, &'static str)]) -> Self {
            Self {
                adjacency: edges
                    .iter()
                    .map(|(node, targets)| (*node, targets.split_whitespace().collect()))
                    .collect(),
                delays: HashMap::new(),
                events: Mutex::new(Vec::new()),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                cancel_on: None,
            }
        }

        fn with_delay(mut self, item: &'static str, millis: u64) -> Self {
            self.delays.insert(item, millis);
            self
        }

        fn cancelling_on(mut self, item: &'static str, token: CancelToken) -> Self {
            self.cancel_on = Some((item, token));
            self
        }

        fn starts(&self) -> Vec<&'static str> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    Event::Start(item) => Some(*item),
                    Event::End(_) => None,
                })
                .collect()
        }

        fn ended(&self, item: &'static str) -> bool {
            self.events.lock().unwrap().contains(&Event::End(item))
        }
    }

    #[async_trait]
    impl AsyncDiscoverer<&'static str> for Recorder {
        async fn discover(&self, item: &&'static str) -> Vec<&'static str> {
            self.events.lock().unwrap().push(Event::Start(*item));
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            if let Some((trigger, token)) = &self.cancel_on {
                if trigger == item {
                    token.cancel();
                }
            }

            let millis = self.delays.get(item).copied().unwrap_or(5);
            tokio::time::sleep(Duration::from_millis(millis)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.events.lock().unwrap().push(Event::End(*item));
            self.adjacency.get(item).cloned().unwrap_or_default()
        }
    }

    #[tokio::test]
    async fn test_example_scenario_matches_sequential_order() {
        let recorder = Recorder::new(&[("A", "B C"), ("B", "A D"), ("C", ""), ("D", "")])
            .with_delay("B", 30)
            .with_delay("C", 1);

        let completion = traverse_concurrent(&recorder, vec!["A"], 4, &CancelToken::new()).await;

        assert_eq!(completion, Completion::Drained);
        assert_eq!(recorder.starts(), vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_empty_seeds_drain_immediately() {
        let recorder = Recorder::new(&[("A", "B")]);
        let completion =
            traverse_concurrent(&recorder, Vec::new(), 4, &CancelToken::new()).await;

        assert_eq!(completion, Completion::Drained);
        assert!(recorder.starts().is_empty());
    }

    #[tokio::test]
    async fn test_in_flight_calls_never_exceed_limit() {
        let children = "c0 c1 c2 c3 c4 c5 c6 c7 c8 c9 c10 c11";
        let recorder = Recorder::new(&[("root", children)]);

        traverse_concurrent(&recorder, vec!["root"], 3, &CancelToken::new()).await;

        assert_eq!(recorder.starts().len(), 13);
        assert_eq!(recorder.peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_limit_runs_one_at_a_time() {
        let recorder = Recorder::new(&[("root", "a b c")]);

        traverse_concurrent(&recorder, vec!["root"], 0, &CancelToken::new()).await;

        assert_eq!(recorder.starts(), vec!["root", "a", "b", "c"]);
        assert_eq!(recorder.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_round_barrier_holds_next_depth_back() {
        // "slow" finishes long after "fast", but "fast"'s child must still
        // wait for the whole depth-1 round to end
        let recorder = Recorder::new(&[("root", "slow fast"), ("slow", ""), ("fast", "child")])
            .with_delay("slow", 40)
            .with_delay("fast", 1);

        traverse_concurrent(&recorder, vec!["root"], 8, &CancelToken::new()).await;

        let events = recorder.events.lock().unwrap().clone();
        let slow_end = events.iter().position(|e| *e == Event::End("slow")).unwrap();
        let child_start = events.iter().position(|e| *e == Event::Start("child")).unwrap();
        assert!(slow_end < child_start, "{:?}", events);
    }

    #[tokio::test]
    async fn test_rediscovered_items_dispatch_once() {
        let recorder = Recorder::new(&[
            ("a", "b c d a"),
            ("b", "c d a b"),
            ("c", "d a b"),
            ("d", "a b c d"),
        ]);

        traverse_concurrent(&recorder, vec!["a", "b", "a"], 4, &CancelToken::new()).await;

        let mut starts = recorder.starts();
        starts.sort();
        assert_eq!(starts, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_cancel_stops_dispatch_but_drains_in_flight() {
        let token = CancelToken::new();
        let recorder = Recorder::new(&[("r", "a b c d"), ("a", "x"), ("b", "y")])
            .with_delay("b", 20)
            .cancelling_on("a", token.clone());

        let completion = traverse_concurrent(&recorder, vec!["r"], 2, &token).await;

        assert_eq!(completion, Completion::Cancelled);
        // a and b were already in flight when a fired the token
        assert_eq!(recorder.starts(), vec!["r", "a", "b"]);
        assert!(recorder.ended("b"));
        assert_eq!(recorder.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancelled_token_dispatches_nothing() {
        let token = CancelToken::new();
        token.cancel();
        let recorder = Recorder::new(&[("r", "a")]);

        let completion = traverse_concurrent(&recorder, vec!["r"], 2, &token).await;

        assert_eq!(completion, Completion::Cancelled);
        assert!(recorder.starts().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_traversals_do_not_share_state() {
        let first = Recorder::new(&[("a", "b"), ("b", "")]);
        let second = Recorder::new(&[("a", "b"), ("b", "")]);
        let token = CancelToken::new();

        let (one, two) = tokio::join!(
            traverse_concurrent(&first, vec!["a"], 2, &token),
            traverse_concurrent(&second, vec!["a"], 2, &token),
        );

        assert_eq!((one, two), (Completion::Drained, Completion::Drained));
        assert_eq!(first.starts(), vec!["a", "b"]);
        assert_eq!(second.starts(), vec!["a", "b"]);
    }

    #[tokio::test]
    #[should_panic(expected = "discovery exploded")]
    async fn test_panic_in_discover_propagates() {
        struct Exploding;

        #[async_trait]
        impl AsyncDiscoverer<u32> for Exploding {
            async fn discover(&self, item: &u32) -> Vec<u32> {
                if *item == 3 {
                    panic!("discovery exploded");
                }
                vec![item + 1]
            }
        }

        traverse_concurrent(&Exploding, vec![0], 2, &CancelToken::new()).await;
    }
}
