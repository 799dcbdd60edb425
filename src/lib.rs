pub mod buffer;
pub mod core;
