//! Buffer Error Types

#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Invalid capacity: {capacity} (must be at least 1)")]
    InvalidCapacity { capacity: usize },

    #[error("Blocking operation interrupted")]
    Interrupted,

    #[error("Operation failed: {message}")]
    OperationFailed { message: String },
}

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;
