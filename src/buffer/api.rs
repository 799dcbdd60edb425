//! Public API for the buffer component
//!
//! This module provides the complete public API for the bounded blocking
//! buffer. External modules should import from here rather than directly
//! from internal modules. See the module documentation for usage examples
//! and architecture details.

// Core buffer
pub use crate::buffer::internal::BoundedBuffer;

// Worker-facing handles
pub use crate::buffer::consumer::Consumer;
pub use crate::buffer::producer::Producer;

// Error handling
pub use crate::buffer::error::{BufferError, BufferResult};

// Configuration and supporting types
pub use crate::buffer::types::{BufferStats, PutResult, WakeOrder};
