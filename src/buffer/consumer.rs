//! Consumer handle for dequeuing items
//!
//! Consumers pull items out of a shared buffer in FIFO order, blocking
//! while it is empty. Any number of consumers may drain the same buffer;
//! each item is delivered to exactly one of them.

use crate::buffer::error::{BufferError, BufferResult};
use crate::buffer::internal::BoundedBuffer;
use log::debug;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Handle for dequeuing items from a shared buffer
///
/// A lightweight, labelled handle over `Weak<BoundedBuffer<T>>`, intended
/// to be moved into a consumer worker thread. The handle registers with the
/// buffer on creation and unregisters on drop, so `stats()` reflects how
/// many consumers are attached.
///
/// # Example
///
/// ```
/// # use boundedq::buffer::BoundedBuffer;
/// # use std::sync::Arc;
/// # use std::time::Duration;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let buffer = Arc::new(BoundedBuffer::new(16)?);
/// let consumer = buffer.create_consumer("worker".to_string())?;
/// # buffer.put(1)?;
///
/// // Blocks until an item arrives
/// let item = consumer.take()?;
///
/// // Or drain what is immediately available, up to a batch limit
/// let batch = consumer.take_batch(10)?;
/// # let _ = (item, batch);
/// # Ok(())
/// # }
/// ```
pub struct Consumer<T> {
    consumer_id: String,
    buffer: Weak<BoundedBuffer<T>>,
}

impl<T> Consumer<T> {
    pub(crate) fn new(consumer_id: String, buffer: Weak<BoundedBuffer<T>>) -> BufferResult<Self> {
        if let Some(buffer) = buffer.upgrade() {
            buffer.register_consumer()?;
        }
        debug!("consumer '{}' attached", consumer_id);
        Ok(Self {
            consumer_id,
            buffer,
        })
    }

    pub fn consumer_id(&self) -> &str {
        &self.consumer_id
    }

    /// Dequeue the oldest item, blocking while the buffer is empty
    pub fn take(&self) -> BufferResult<T> {
        self.buffer()?.take()
    }

    /// Dequeue the oldest item, giving up after `timeout`
    pub fn try_take(&self, timeout: Duration) -> BufferResult<Option<T>> {
        self.buffer()?.try_take(timeout)
    }

    /// Dequeue up to `max` immediately available items without blocking
    pub fn take_batch(&self, max: usize) -> BufferResult<Vec<T>> {
        let buffer = self.buffer()?;
        let mut batch = Vec::with_capacity(max);

        for _ in 0..max {
            match buffer.try_take(Duration::ZERO)? {
                Some(item) => batch.push(item),
                None => break, // Nothing more available right now
            }
        }

        Ok(batch)
    }

    fn buffer(&self) -> BufferResult<Arc<BoundedBuffer<T>>> {
        self.buffer
            .upgrade()
            .ok_or_else(|| BufferError::OperationFailed {
                message: "buffer no longer exists".to_string(),
            })
    }
}

impl<T> Drop for Consumer<T> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.upgrade() {
            let _ = buffer.unregister_consumer();
        }
        debug!("consumer '{}' detached", self.consumer_id);
    }
}
