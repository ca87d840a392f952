//! Error type for the median module and its mapping onto ABI status codes.

use thiserror::Error;

/// Status returned by the entry points when the median was written.
pub const STATUS_OK: i32 = 0;
/// Status returned by the entry points for any rejected input.
pub const STATUS_INVALID: i32 = -1;

pub type MedianResult<T> = Result<T, MedianError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MedianError {
    #[error("invalid input length: {byte_length} bytes is not a multiple of the element size")]
    InvalidLength { byte_length: usize },
    #[error("empty sample: the median of zero elements is undefined")]
    EmptySample,
    #[error("null pointer passed for {0}")]
    NullPointer(&'static str),
    #[error("encoding error: {0}")]
    Encode(String),
}

impl MedianError {
    /// ABI status code reported to the host. Every failure maps to `-1`.
    pub fn status(&self) -> i32 {
        match self {
            MedianError::InvalidLength { .. }
            | MedianError::EmptySample
            | MedianError::NullPointer(_)
            | MedianError::Encode(_) => STATUS_INVALID,
        }
    }
}

impl From<serde_json::Error> for MedianError {
    fn from(e: serde_json::Error) -> Self {
        MedianError::Encode(e.to_string())
    }
}
