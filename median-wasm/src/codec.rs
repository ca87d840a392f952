//! Output encodings for the median result.
//!
//! `Raw` is the 8-byte native `f64`. `Structured` is a JSON object with a
//! single `median` field, serialized with serde_json.

use serde::{Deserialize, Serialize};

use crate::error::MedianResult;

/// How the result is handed back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputEncoding {
    Raw,
    #[default]
    Structured,
}

/// Serialized form of the structured output: `{"median": <number>}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MedianReport {
    pub median: f64,
}

/// Raw encoding: the value's native-endian bytes.
pub fn encode_raw(result: f64) -> [u8; 8] {
    result.to_ne_bytes()
}

/// Structured encoding: a freshly allocated JSON buffer.
pub fn encode_structured(result: f64) -> MedianResult<Vec<u8>> {
    let bytes = serde_json::to_vec(&MedianReport { median: result })?;
    Ok(bytes)
}

/// Parse a structured buffer back into the median value.
pub fn decode_structured(bytes: &[u8]) -> MedianResult<f64> {
    let report: MedianReport = serde_json::from_slice(bytes)?;
    Ok(report.median)
}
