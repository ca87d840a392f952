//! Pointer-free core shared by every entry point.

use crate::codec::{encode_raw, encode_structured, OutputEncoding};
use crate::error::MedianResult;
use crate::median::median;
use crate::sample::decode;

/// Encoded median, tagged by encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    Raw([u8; 8]),
    Structured(Vec<u8>),
}

impl Encoded {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Encoded::Raw(bytes) => bytes,
            Encoded::Structured(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Encoded::Raw(bytes) => bytes.to_vec(),
            Encoded::Structured(bytes) => bytes,
        }
    }
}

/// Decode `input`, compute its median once, and encode it as requested.
pub fn run(input: &[u8], encoding: OutputEncoding) -> MedianResult<Encoded> {
    let sample = decode(input)?;
    let result = median(sample);
    match encoding {
        OutputEncoding::Raw => Ok(Encoded::Raw(encode_raw(result))),
        OutputEncoding::Structured => Ok(Encoded::Structured(encode_structured(result)?)),
    }
}
