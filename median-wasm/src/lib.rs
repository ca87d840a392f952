//! Median compute module.
//!
//! The host writes a sample of `i32` values into linear memory, calls one of the
//! exported entry points with a pointer and a byte length, and reads the median
//! back either as a raw `f64` or as a `{"median": <number>}` JSON buffer.
//!
//! Layout:
//! - [`sample`]: decode a byte view into a non-empty [`Sample`].
//! - [`median`]: sort and average the central order statistics.
//! - [`codec`]: raw and structured encodings of the result.
//! - [`exec`]: the pointer-free core shared by every entry point.
//! - [`abi`]: the `extern "C"` exports (`allocate`, `exec`, `exec_raw`).

#![deny(clippy::mem_forget)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod abi;
pub mod codec;
pub mod error;
pub mod exec;
pub mod median;
pub mod sample;

pub use codec::{decode_structured, encode_raw, encode_structured, MedianReport, OutputEncoding};
pub use error::{MedianError, MedianResult, STATUS_INVALID, STATUS_OK};
pub use exec::{run, Encoded};
pub use median::{median, order_statistic_indices};
pub use sample::{decode, Sample, ELEMENT_SIZE};
