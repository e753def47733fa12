//! NDR error types

use thiserror::Error;

/// NDR encoding/decoding errors
#[derive(Debug, Error)]
pub enum NdrError {
    /// Buffer underflow - not enough data
    #[error("buffer underflow: needed {needed} bytes, have {have}")]
    BufferUnderflow { needed: usize, have: usize },

    /// A declared element count cannot be satisfied by the remaining input
    #[error("declared size {declared} exceeds remaining buffer ({remaining} bytes)")]
    SizeExceedsBuffer { declared: usize, remaining: usize },

    /// Allocation would exceed the configured limit
    #[error("allocation limit exceeded: requested {requested} bytes, limit {limit}")]
    AllocationLimitExceeded { requested: usize, limit: usize },

    /// Invalid string - not null terminated or invalid encoding
    #[error("invalid string: {0}")]
    InvalidString(String),

    /// Invalid pointer - unexpected referent ID
    #[error("invalid pointer: referent ID 0x{0:08x}")]
    InvalidPointer(u32),

    /// Invalid enum value
    #[error("invalid enum value: {0}")]
    InvalidEnumValue(u32),

    /// Conformance mismatch
    #[error("conformance mismatch: max_count={max_count}, actual_count={actual_count}")]
    ConformanceMismatch { max_count: u32, actual_count: u32 },

    /// A length field disagrees with the data it describes
    #[error("length mismatch for {field}: declared {declared}, actual {actual}")]
    LengthMismatch {
        field: &'static str,
        declared: usize,
        actual: usize,
    },

    /// A count does not fit the 32-bit wire representation
    #[error("integer overflow: {0} does not fit in a 32-bit count")]
    IntegerOverflow(usize),

    /// UTF-16 decoding error
    #[error("UTF-16 error: {0}")]
    Utf16Error(#[from] std::string::FromUtf16Error),
}

/// Result type for NDR operations
pub type Result<T> = std::result::Result<T, NdrError>;
