use thiserror::Error;

/// Errors returned by [`RollingBuffer`](crate::RollingBuffer) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RollingBufferError {
    /// Tried to pop or peek an empty buffer.
    #[error("rolling buffer is empty")]
    EmptyContainer,
    /// Positional access past the newest-first range of live items.
    #[error("index {index} out of range for rolling buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// Tried to construct a buffer that can hold nothing.
    #[error("rolling buffer capacity must be greater than zero")]
    InvalidConfiguration,
}
