//! Error types for ShardBuf
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using ShardError
pub type Result<T> = std::result::Result<T, ShardError>;

/// Unified error type for ShardBuf operations
#[derive(Debug, Error)]
pub enum ShardError {
    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Entry index {idx} out of range (store holds {len} entries)")]
    OutOfRange { idx: usize, len: usize },

    #[error("Output buffer too small: need {required} bytes, have {capacity}")]
    Overflow { required: usize, capacity: usize },

    #[error("Range [{offset}, +{len}) outside entry {idx} of length {logical_len}")]
    InvalidRange {
        idx: usize,
        offset: usize,
        len: usize,
        logical_len: usize,
    },

    // -------------------------------------------------------------------------
    // Internal Errors
    // -------------------------------------------------------------------------
    #[error("Invariant violated: {0}")]
    Invariant(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
