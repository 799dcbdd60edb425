//! Internal BoundedBuffer implementation with guarded suspension
//!
//! This module provides the core blocking buffer:
//! - Fixed-capacity FIFO storage behind a single mutex guard
//! - Two condition variables (`not_full`, `not_empty`) with `while`-loop
//!   re-validation on every wake
//! - Deadline-based timed variants that never strand the guard
//! - A sticky interrupt flag that cancels blocked threads observably

use crate::buffer::consumer::Consumer;
use crate::buffer::error::{BufferError, BufferResult};
use crate::buffer::producer::Producer;
use crate::buffer::types::{BufferStats, PutResult, WakeOrder};
use crate::core::sync::{handle_condvar_wait, handle_condvar_wait_timeout, handle_mutex_poison};
use log::{debug, trace};
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// FIFO line of tickets for fair-mode wakeup ordering
///
/// Each waiter takes a ticket on arrival; only the front ticket may claim
/// the next slot/item. Waiters that give up (timeout, interrupt) remove
/// their ticket so the line keeps advancing.
#[derive(Debug, Default)]
struct WaitLine {
    next_ticket: u64,
    line: VecDeque<u64>,
}

impl WaitLine {
    fn enter(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.line.push_back(ticket);
        ticket
    }

    fn is_front(&self, ticket: u64) -> bool {
        self.line.front() == Some(&ticket)
    }

    fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    fn leave(&mut self, ticket: u64) {
        if let Some(pos) = self.line.iter().position(|&t| t == ticket) {
            self.line.remove(pos);
        }
    }
}

/// All mutable state, accessed only while holding the guard
#[derive(Debug)]
struct BufferState<T> {
    items: VecDeque<T>,
    interrupted: bool,
    waiting_producers: usize,
    waiting_consumers: usize,
    active_producers: usize,
    active_consumers: usize,
    total_puts: u64,
    total_takes: u64,
    put_line: WaitLine,
    take_line: WaitLine,
}

/// Bounded, thread-safe, blocking producer/consumer buffer
///
/// A fixed-capacity FIFO queue safe to share between any number of producer
/// and consumer threads. `put` blocks while the buffer is full, `take`
/// blocks while it is empty; both suspend on a condition variable and
/// consume no CPU while waiting.
///
/// # Thread Safety
///
/// All state is protected by one mutex (the guard); no method touches the
/// storage outside the critical section. Share across threads with
/// `Arc<BoundedBuffer<T>>`.
///
/// # Example
///
/// ```
/// use boundedq::buffer::BoundedBuffer;
/// use std::sync::Arc;
/// use std::thread;
///
/// let buffer = Arc::new(BoundedBuffer::new(5).unwrap());
///
/// let producer = {
///     let buffer = Arc::clone(&buffer);
///     thread::spawn(move || {
///         for i in 1..=10 {
///             buffer.put(i).unwrap();
///         }
///     })
/// };
///
/// let consumer = {
///     let buffer = Arc::clone(&buffer);
///     thread::spawn(move || {
///         (1..=10).map(|_| buffer.take().unwrap()).collect::<Vec<i32>>()
///     })
/// };
///
/// producer.join().unwrap();
/// assert_eq!(consumer.join().unwrap(), (1..=10).collect::<Vec<i32>>());
/// ```
#[derive(Debug)]
pub struct BoundedBuffer<T> {
    state: Mutex<BufferState<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
    wake_order: WakeOrder,
}

impl<T> BoundedBuffer<T> {
    /// Create a buffer with the default barging wake order
    pub fn new(capacity: usize) -> BufferResult<Self> {
        Self::with_wake_order(capacity, WakeOrder::Barging)
    }

    /// Create a buffer with an explicit wakeup-order policy
    ///
    /// Capacity is fixed for the lifetime of the buffer and must be at
    /// least 1.
    pub fn with_wake_order(capacity: usize, wake_order: WakeOrder) -> BufferResult<Self> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity { capacity });
        }
        Ok(Self {
            state: Mutex::new(BufferState {
                items: VecDeque::with_capacity(capacity),
                interrupted: false,
                waiting_producers: 0,
                waiting_consumers: 0,
                active_producers: 0,
                active_consumers: 0,
                total_puts: 0,
                total_takes: 0,
                put_line: WaitLine::default(),
                take_line: WaitLine::default(),
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
            wake_order,
        })
    }

    /// Fixed capacity of the buffer
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Wakeup-order policy this buffer was built with
    pub fn wake_order(&self) -> WakeOrder {
        self.wake_order
    }

    /// Enqueue an item, blocking while the buffer is full
    ///
    /// Once this returns `Ok`, ownership of the item has passed to the
    /// buffer. Fails with [`BufferError::Interrupted`] if the buffer is
    /// interrupted before or during the wait; the item is dropped in that
    /// case.
    pub fn put(&self, item: T) -> BufferResult<()> {
        let state = self.lock_state()?;
        let (mut state, _) = self.wait_for_space(state, None)?;
        state.items.push_back(item);
        state.total_puts += 1;
        drop(state);
        self.signal(&self.not_empty);
        Ok(())
    }

    /// Dequeue the oldest item, blocking while the buffer is empty
    ///
    /// Fails with [`BufferError::Interrupted`] if the buffer is interrupted
    /// before or during the wait.
    pub fn take(&self) -> BufferResult<T> {
        let state = self.lock_state()?;
        let (mut state, _) = self.wait_for_item(state, None)?;
        let item = state
            .items
            .pop_front()
            .ok_or_else(|| internal_error("storage empty after a satisfied wait".to_string()))?;
        state.total_takes += 1;
        drop(state);
        self.signal(&self.not_full);
        Ok(item)
    }

    /// Enqueue an item, giving up after `timeout`
    ///
    /// Returns [`PutResult::TimedOut`] carrying the item back if the buffer
    /// stayed full; timing out is routine control flow, not an error. The
    /// guard is never left held on timeout.
    pub fn try_put(&self, item: T, timeout: Duration) -> BufferResult<PutResult<T>> {
        let deadline = Instant::now().checked_add(timeout);
        let state = self.lock_state()?;
        let (mut state, available) = self.wait_for_space(state, deadline)?;
        if !available {
            return Ok(PutResult::TimedOut(item));
        }
        state.items.push_back(item);
        state.total_puts += 1;
        drop(state);
        self.signal(&self.not_empty);
        Ok(PutResult::Accepted)
    }

    /// Dequeue the oldest item, giving up after `timeout`
    ///
    /// Returns `Ok(None)` if no item arrived within the timeout.
    pub fn try_take(&self, timeout: Duration) -> BufferResult<Option<T>> {
        let deadline = Instant::now().checked_add(timeout);
        let state = self.lock_state()?;
        let (mut state, available) = self.wait_for_item(state, deadline)?;
        if !available {
            return Ok(None);
        }
        let item = state
            .items
            .pop_front()
            .ok_or_else(|| internal_error("storage empty after a satisfied wait".to_string()))?;
        state.total_takes += 1;
        drop(state);
        self.signal(&self.not_full);
        Ok(Some(item))
    }

    /// Momentary number of items resident in the buffer
    ///
    /// Advisory only: the value can be stale the instant it is returned if
    /// concurrent producers or consumers exist.
    pub fn len(&self) -> BufferResult<usize> {
        Ok(self.lock_state()?.items.len())
    }

    /// True if the buffer currently holds no items (advisory)
    pub fn is_empty(&self) -> BufferResult<bool> {
        Ok(self.lock_state()?.items.is_empty())
    }

    /// True if the buffer is currently at capacity (advisory)
    pub fn is_full(&self) -> BufferResult<bool> {
        let state = self.lock_state()?;
        Ok(state.items.len() == self.capacity)
    }

    /// Advisory statistics snapshot taken under the guard
    pub fn stats(&self) -> BufferResult<BufferStats> {
        let state = self.lock_state()?;
        Ok(BufferStats {
            len: state.items.len(),
            capacity: self.capacity,
            waiting_producers: state.waiting_producers,
            waiting_consumers: state.waiting_consumers,
            active_producers: state.active_producers,
            active_consumers: state.active_consumers,
            total_puts: state.total_puts,
            total_takes: state.total_takes,
        })
    }

    /// Cancel every blocked thread and fail all further blocking calls
    ///
    /// Sets a sticky interrupt flag and wakes all waiters on both
    /// conditions. Blocked `put`/`take`/`try_put`/`try_take` calls return
    /// [`BufferError::Interrupted`]; so do subsequent blocking calls until
    /// [`clear_interrupt`](Self::clear_interrupt). The flag staying set is
    /// what makes the cancellation observable by every caller - it is never
    /// silently swallowed. Items already enqueued stay in place and all
    /// invariants hold.
    pub fn interrupt(&self) -> BufferResult<()> {
        let mut state = self.lock_state()?;
        state.interrupted = true;
        debug!(
            "buffer interrupted; waking {} blocked producer(s) and {} blocked consumer(s)",
            state.waiting_producers, state.waiting_consumers
        );
        drop(state);
        // One state change satisfies two distinct predicates, so this is
        // the one place broadcast is required on both conditions.
        self.not_full.notify_all();
        self.not_empty.notify_all();
        Ok(())
    }

    /// True if the buffer has been interrupted and not yet cleared
    pub fn is_interrupted(&self) -> BufferResult<bool> {
        Ok(self.lock_state()?.interrupted)
    }

    /// Acknowledge an interrupt and make the buffer usable again
    pub fn clear_interrupt(&self) -> BufferResult<()> {
        let mut state = self.lock_state()?;
        state.interrupted = false;
        debug!("buffer interrupt cleared");
        Ok(())
    }

    /// Create a labelled producer handle sharing this buffer
    pub fn create_producer(self: &Arc<Self>, producer_id: String) -> BufferResult<Producer<T>> {
        Producer::new(producer_id, Arc::downgrade(self))
    }

    /// Create a labelled consumer handle sharing this buffer
    pub fn create_consumer(self: &Arc<Self>, consumer_id: String) -> BufferResult<Consumer<T>> {
        Consumer::new(consumer_id, Arc::downgrade(self))
    }

    pub(crate) fn register_producer(&self) -> BufferResult<()> {
        let mut state = self.lock_state()?;
        state.active_producers += 1;
        Ok(())
    }

    pub(crate) fn unregister_producer(&self) -> BufferResult<()> {
        let mut state = self.lock_state()?;
        state.active_producers = state.active_producers.saturating_sub(1);
        Ok(())
    }

    pub(crate) fn register_consumer(&self) -> BufferResult<()> {
        let mut state = self.lock_state()?;
        state.active_consumers += 1;
        Ok(())
    }

    pub(crate) fn unregister_consumer(&self) -> BufferResult<()> {
        let mut state = self.lock_state()?;
        state.active_consumers = state.active_consumers.saturating_sub(1);
        Ok(())
    }

    fn lock_state(&self) -> BufferResult<MutexGuard<'_, BufferState<T>>> {
        handle_mutex_poison(self.state.lock(), |message| BufferError::OperationFailed {
            message,
        })
    }

    /// Wake threads blocked on `condition`
    ///
    /// Barging mode wakes exactly one waiter: every waiter re-validates its
    /// predicate in a loop, so a targeted wake is sufficient and cheaper.
    /// Fair mode must broadcast so the front-of-line waiter always gets a
    /// chance to run, whichever thread the OS would have picked.
    fn signal(&self, condition: &Condvar) {
        match self.wake_order {
            WakeOrder::Barging => condition.notify_one(),
            WakeOrder::Fifo => condition.notify_all(),
        }
    }

    /// Block until a slot is free, the deadline passes, or an interrupt
    ///
    /// Returns the reacquired guard plus `true` when a slot is available
    /// and (in fair mode) it is this thread's turn. Guarded suspension: the
    /// predicate is re-validated after every wake, because waiters race for
    /// the same slot and spurious wakeups are possible. An `if` instead of
    /// this loop is a lost-wakeup bug.
    fn wait_for_space<'a>(
        &'a self,
        mut state: MutexGuard<'a, BufferState<T>>,
        deadline: Option<Instant>,
    ) -> BufferResult<(MutexGuard<'a, BufferState<T>>, bool)> {
        if state.interrupted {
            return Err(BufferError::Interrupted);
        }
        let fair = self.wake_order == WakeOrder::Fifo;
        if state.items.len() < self.capacity && (!fair || state.put_line.is_empty()) {
            return Ok((state, true));
        }

        let ticket = if fair {
            Some(state.put_line.enter())
        } else {
            None
        };
        state.waiting_producers += 1;
        trace!(
            "producer waiting for space (len={}, capacity={})",
            state.items.len(),
            self.capacity
        );

        let outcome = loop {
            if state.interrupted {
                break Err(BufferError::Interrupted);
            }
            let my_turn = ticket.map_or(true, |t| state.put_line.is_front(t));
            if my_turn && state.items.len() < self.capacity {
                break Ok(true);
            }
            state = match deadline {
                None => handle_condvar_wait(self.not_full.wait(state), |message| {
                    BufferError::OperationFailed { message }
                })?,
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break Ok(false);
                    }
                    let (guard, _) = handle_condvar_wait_timeout(
                        self.not_full.wait_timeout(state, deadline - now),
                        |message| BufferError::OperationFailed { message },
                    )?;
                    guard
                }
            };
        };

        state.waiting_producers -= 1;
        if let Some(ticket) = ticket {
            state.put_line.leave(ticket);
            if !state.put_line.is_empty() {
                // Front of the line may have changed; let the next waiter
                // re-check its predicate.
                self.not_full.notify_all();
            }
        }
        trace!("producer finished waiting (outcome={:?})", outcome);
        outcome.map(|available| (state, available))
    }

    /// Block until an item is present, the deadline passes, or an interrupt
    ///
    /// Mirror of [`wait_for_space`](Self::wait_for_space) for the consumer
    /// side.
    fn wait_for_item<'a>(
        &'a self,
        mut state: MutexGuard<'a, BufferState<T>>,
        deadline: Option<Instant>,
    ) -> BufferResult<(MutexGuard<'a, BufferState<T>>, bool)> {
        if state.interrupted {
            return Err(BufferError::Interrupted);
        }
        let fair = self.wake_order == WakeOrder::Fifo;
        if !state.items.is_empty() && (!fair || state.take_line.is_empty()) {
            return Ok((state, true));
        }

        let ticket = if fair {
            Some(state.take_line.enter())
        } else {
            None
        };
        state.waiting_consumers += 1;
        trace!("consumer waiting for items");

        let outcome = loop {
            if state.interrupted {
                break Err(BufferError::Interrupted);
            }
            let my_turn = ticket.map_or(true, |t| state.take_line.is_front(t));
            if my_turn && !state.items.is_empty() {
                break Ok(true);
            }
            state = match deadline {
                None => handle_condvar_wait(self.not_empty.wait(state), |message| {
                    BufferError::OperationFailed { message }
                })?,
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break Ok(false);
                    }
                    let (guard, _) = handle_condvar_wait_timeout(
                        self.not_empty.wait_timeout(state, deadline - now),
                        |message| BufferError::OperationFailed { message },
                    )?;
                    guard
                }
            };
        };

        state.waiting_consumers -= 1;
        if let Some(ticket) = ticket {
            state.take_line.leave(ticket);
            if !state.take_line.is_empty() {
                self.not_empty.notify_all();
            }
        }
        trace!("consumer finished waiting (outcome={:?})", outcome);
        outcome.map(|available| (state, available))
    }
}

fn internal_error(message: String) -> BufferError {
    BufferError::OperationFailed { message }
}
