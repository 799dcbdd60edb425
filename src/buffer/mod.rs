//! Bounded Blocking Buffer Component
//!
//! A fixed-capacity, thread-safe, blocking producer/consumer buffer built
//! on the classic mutex-plus-two-conditions monitor design.
//!
//! # Overview
//!
//! This module provides a generic FIFO buffer that any number of producer
//! and consumer threads can share. Key properties:
//!
//! - **Blocking backpressure**: `put` suspends while the buffer is full,
//!   `take` suspends while it is empty; waiting consumes no CPU
//! - **Strict FIFO**: items are dequeued in enqueue order
//! - **No loss, no duplication**: each item put is taken exactly once,
//!   regardless of thread interleaving
//! - **Timed variants**: `try_put`/`try_take` give up after a timeout,
//!   reported as a return value rather than an error
//! - **Observable cancellation**: `interrupt()` wakes every blocked thread
//!   with an `Interrupted` error, never swallowed
//! - **Configurable wakeup order**: default barging wakeup, or FIFO-fair
//!   wakeup of waiting threads at a throughput cost
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ put                │ put                │ put (blocks when full)
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                BoundedBuffer<T> (capacity k)            │
//! │   guard: Mutex ─┬─ not_full: Condvar (producers wait)   │
//! │                 └─ not_empty: Condvar (consumers wait)  │
//! │             ┌───┬───┬───┬───┬───┐                       │
//! │             │ 1 │ 2 │ 3 │ … │ k │  strict FIFO          │
//! │             └───┴───┴───┴───┴───┘                       │
//! └─────────────────────────────────────────────────────────┘
//!        │ take               │ take               │ take (blocks when empty)
//! ┌──────┴───────┐     ┌──────┴───────┐     ┌──────┴───────┐
//! │  Consumer A  │     │  Consumer B  │     │  Consumer C  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use boundedq::buffer::BoundedBuffer;
//! use std::sync::Arc;
//! use std::thread;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // One explicitly owned buffer, shared via Arc (no global singleton)
//! let buffer = Arc::new(BoundedBuffer::new(5)?);
//!
//! let producer = buffer.create_producer("feeder".to_string())?;
//! let consumer = buffer.create_consumer("drainer".to_string())?;
//!
//! let feeder = thread::spawn(move || {
//!     for i in 1..=10 {
//!         producer.put(i).unwrap(); // blocks at item 6 until draining starts
//!     }
//! });
//!
//! for expected in 1..=10 {
//!     assert_eq!(consumer.take()?, expected);
//! }
//! feeder.join().unwrap();
//! assert_eq!(buffer.len()?, 0);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod consumer;
mod error;
mod internal;
mod producer;
mod types;

pub use consumer::Consumer;
pub use error::{BufferError, BufferResult};
pub use internal::BoundedBuffer;
pub use producer::Producer;
pub use types::{BufferStats, PutResult, WakeOrder};

#[cfg(test)]
mod tests;
