//! Producer handle for enqueuing items
//!
//! Producers push items into a shared buffer, blocking while it is full.
//! Each producer is identified by a producer_id used in log output; any
//! number of producers may feed the same buffer concurrently.

use crate::buffer::error::{BufferError, BufferResult};
use crate::buffer::internal::BoundedBuffer;
use crate::buffer::types::PutResult;
use log::debug;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Handle for enqueuing items into a shared buffer
///
/// A lightweight, labelled handle over `Weak<BoundedBuffer<T>>`, intended
/// to be moved into a producer worker thread. The handle registers with the
/// buffer on creation and unregisters on drop, so `stats()` reflects how
/// many producers are attached.
///
/// # Example
///
/// ```
/// # use boundedq::buffer::BoundedBuffer;
/// # use std::sync::Arc;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let buffer = Arc::new(BoundedBuffer::new(16)?);
/// let producer = buffer.create_producer("scanner".to_string())?;
///
/// producer.put("item".to_string())?;
/// # Ok(())
/// # }
/// ```
pub struct Producer<T> {
    producer_id: String,
    buffer: Weak<BoundedBuffer<T>>,
}

impl<T> Producer<T> {
    pub(crate) fn new(producer_id: String, buffer: Weak<BoundedBuffer<T>>) -> BufferResult<Self> {
        if let Some(buffer) = buffer.upgrade() {
            buffer.register_producer()?;
        }
        debug!("producer '{}' attached", producer_id);
        Ok(Self {
            producer_id,
            buffer,
        })
    }

    pub fn producer_id(&self) -> &str {
        &self.producer_id
    }

    /// Enqueue an item, blocking while the buffer is full
    pub fn put(&self, item: T) -> BufferResult<()> {
        self.buffer()?.put(item)
    }

    /// Enqueue an item, giving up after `timeout`
    pub fn try_put(&self, item: T, timeout: Duration) -> BufferResult<PutResult<T>> {
        self.buffer()?.try_put(item, timeout)
    }

    fn buffer(&self) -> BufferResult<Arc<BoundedBuffer<T>>> {
        self.buffer
            .upgrade()
            .ok_or_else(|| BufferError::OperationFailed {
                message: "buffer no longer exists".to_string(),
            })
    }
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.upgrade() {
            let _ = buffer.unregister_producer();
        }
        debug!("producer '{}' detached", self.producer_id);
    }
}
