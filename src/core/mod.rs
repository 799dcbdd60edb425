//! Shared infrastructure used by the buffer component

pub mod sync;
