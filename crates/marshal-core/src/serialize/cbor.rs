use crate::{
    serialize::{Codec, CodecConfig, CodecError, check_size},
    value::Value,
};
use serde_cbor::{from_slice, to_vec};
use std::panic::{AssertUnwindSafe, catch_unwind};

///
/// CborCodec
///
/// Safety guarantees on decode:
/// - Input size is bounded before decode.
/// - Any panic during decode is caught and reported as a decode error.
/// - No panic escapes `unmarshal`.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CborCodec {
    config: CodecConfig,
}

impl CborCodec {
    #[must_use]
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.config.max_bytes
    }
}

impl Codec for CborCodec {
    fn name(&self) -> &'static str {
        "cbor"
    }

    fn marshal(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        check_size(bytes, self.config.max_bytes)?;

        let result = catch_unwind(AssertUnwindSafe(|| from_slice::<Value>(bytes)));

        match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(CodecError::Decode(err.to_string())),
            Err(_) => Err(CodecError::Decode(
                "panic during CBOR deserialization".into(),
            )),
        }
    }
}

///
/// TESTS
///
