//! Decoding of the host's input buffer into a [`Sample`].
//!
//! The buffer is a packed run of native-endian `i32` values. Elements are read
//! at a stride of [`ELEMENT_SIZE`] bytes in ascending offset order; no
//! reordering happens here.

use crate::error::{MedianError, MedianResult};

/// Byte width of one sample entry.
pub const ELEMENT_SIZE: usize = std::mem::size_of::<i32>();

/// A non-empty, transient sequence of sample values in memory order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    values: Vec<i32>,
}

impl Sample {
    /// Build a sample from owned values. Rejects an empty vector.
    pub fn new(values: Vec<i32>) -> MedianResult<Self> {
        if values.is_empty() {
            return Err(MedianError::EmptySample);
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed sample.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<i32> {
        self.values
    }
}

impl TryFrom<Vec<i32>> for Sample {
    type Error = MedianError;

    fn try_from(values: Vec<i32>) -> MedianResult<Self> {
        Sample::new(values)
    }
}

/// Decode a byte view into a sample.
///
/// Fails with [`MedianError::InvalidLength`] when `bytes.len()` is not a
/// multiple of [`ELEMENT_SIZE`], and with [`MedianError::EmptySample`] when
/// the view holds no elements.
pub fn decode(bytes: &[u8]) -> MedianResult<Sample> {
    if bytes.len() % ELEMENT_SIZE != 0 {
        tracing::warn!(byte_length = bytes.len(), "rejecting misaligned sample buffer");
        return Err(MedianError::InvalidLength {
            byte_length: bytes.len(),
        });
    }

    let values: Vec<i32> = bytes
        .chunks_exact(ELEMENT_SIZE)
        .map(|chunk| {
            let mut word = [0u8; ELEMENT_SIZE];
            word.copy_from_slice(chunk);
            i32::from_ne_bytes(word)
        })
        .collect();

    tracing::debug!(count = values.len(), "decoded sample");
    Sample::new(values)
}
