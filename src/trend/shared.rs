//! src/trend/shared.rs
//!
//! Thread-shared handle to a trend graph.
//!
//! Sample producers (serial reader, control server) and the frame loop run on
//! different threads, so `add` and `render` are serialized by one mutex.

use std::sync::{Arc, Mutex, MutexGuard};

use super::engine::TrendGraph;

/// Alias: Arc<Mutex<TrendGraph>>
pub type SharedTrend = Arc<Mutex<TrendGraph>>;

/// Alias for a lock guard.
pub type TrendGuard<'a> = MutexGuard<'a, TrendGraph>;

/// Wrap a graph for sharing across threads.
pub fn share(graph: TrendGraph) -> SharedTrend {
    Arc::new(Mutex::new(graph))
}

/// Lock the graph. A producer that panicked mid-`add` leaves the buffer in a
/// usable state, so a poisoned lock is recovered instead of propagated.
pub fn lock(shared: &SharedTrend) -> TrendGuard<'_> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
