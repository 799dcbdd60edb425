//! Type definitions for the buffer component
//!
//! This module contains the supporting data structures used by the bounded
//! buffer: the wakeup-order policy, the timed-put outcome, and the advisory
//! statistics snapshot.

/// Wakeup ordering policy for threads blocked on the buffer
///
/// Chooses between raw throughput and FIFO-fair wakeup of waiting threads.
/// This affects only *which* blocked thread proceeds first; element order
/// through the buffer is strictly FIFO in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WakeOrder {
    /// Wake one waiter per state change; a newly arriving thread may win
    /// over a longer-waiting one ("barging"). Fastest option.
    #[default]
    Barging,
    /// Wake waiters in arrival order via per-side ticket lines. Every state
    /// change is broadcast so the front of the line can proceed, which
    /// costs throughput under heavy contention.
    Fifo,
}

/// Outcome of a time-bounded put attempt
///
/// Timing out is routine control flow, not an error, so the rejected item
/// is handed back to the caller rather than dropped.
#[derive(Debug, PartialEq, Eq)]
pub enum PutResult<T> {
    /// The item was enqueued within the timeout.
    Accepted,
    /// The buffer stayed full for the whole timeout. Returns the item so
    /// the caller can retry, reroute, or drop it deliberately.
    TimedOut(T),
}

impl<T> PutResult<T> {
    /// True if the item was enqueued
    pub fn is_accepted(&self) -> bool {
        matches!(self, PutResult::Accepted)
    }
}

/// Advisory statistics snapshot for the buffer
///
/// Taken atomically under the buffer guard, but stale the instant it is
/// returned if concurrent mutators exist. Useful for monitoring, not for
/// control decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferStats {
    /// Number of items currently resident
    pub len: usize,
    /// Fixed capacity of the buffer
    pub capacity: usize,
    /// Threads currently blocked in `put`/`try_put`
    pub waiting_producers: usize,
    /// Threads currently blocked in `take`/`try_take`
    pub waiting_consumers: usize,
    /// Producer handles currently attached
    pub active_producers: usize,
    /// Consumer handles currently attached
    pub active_consumers: usize,
    /// Total items ever enqueued
    pub total_puts: u64,
    /// Total items ever dequeued
    pub total_takes: u64,
}
