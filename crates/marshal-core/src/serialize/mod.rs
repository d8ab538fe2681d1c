//! Codec boundary.
//!
//! The core only threads a `&dyn Codec` through every accessor call; the
//! byte layout is the codec's own business. Both reference codecs here are
//! thin adapters over serde formats.

mod cbor;
mod json;

use crate::value::Value;
use std::fmt;
use thiserror::Error as ThisError;

// re-exports
pub use cbor::CborCodec;
pub use json::JsonCodec;

///
/// CodecError
///

#[derive(Debug, ThisError)]
pub enum CodecError {
    #[error("encode error: {0}")]
    Encode(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("decode size limit exceeded: {len} bytes (limit {max_bytes})")]
    SizeLimitExceeded { len: usize, max_bytes: usize },
}

///
/// CodecErrorKind
///
/// Stable error-kind taxonomy for codec failures.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CodecErrorKind {
    Encode,
    Decode,
    SizeLimitExceeded,
}

impl CodecErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Encode => "encode",
            Self::Decode => "decode",
            Self::SizeLimitExceeded => "size_limit_exceeded",
        }
    }
}

impl fmt::Display for CodecErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CodecError {
    /// Return a stable error kind independent of backend error-message text.
    #[must_use]
    pub const fn kind(&self) -> CodecErrorKind {
        match self {
            Self::Encode(_) => CodecErrorKind::Encode,
            Self::Decode(_) => CodecErrorKind::Decode,
            Self::SizeLimitExceeded { .. } => CodecErrorKind::SizeLimitExceeded,
        }
    }
}

///
/// Codec
///
/// Converts values to and from a wire representation.
///

pub trait Codec: Send + Sync {
    /// Short format name for diagnostics (`"cbor"`, `"json"`, ...).
    fn name(&self) -> &'static str;

    fn marshal(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    fn unmarshal(&self, bytes: &[u8]) -> Result<Value, CodecError>;
}

///
/// CodecConfig
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest payload a codec agrees to decode.
    pub max_bytes: usize,
}

impl CodecConfig {
    pub const DEFAULT_MAX_BYTES: usize = 1024 * 1024;
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_bytes: Self::DEFAULT_MAX_BYTES,
        }
    }
}

pub(crate) fn check_size(bytes: &[u8], max_bytes: usize) -> Result<(), CodecError> {
    if bytes.len() > max_bytes {
        return Err(CodecError::SizeLimitExceeded {
            len: bytes.len(),
            max_bytes,
        });
    }

    Ok(())
}
