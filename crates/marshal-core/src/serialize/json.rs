use crate::{
    serialize::{Codec, CodecConfig, CodecError, check_size},
    value::Value,
};

///
/// JsonCodec
///
/// JSON has no byte strings: blobs encode as arrays of integers, which the
/// map adapter coerces back into bytes. JSON has no NaN or infinity either;
/// `marshal` rejects non-finite floats rather than writing them as `null`.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec {
    config: CodecConfig,
}

impl JsonCodec {
    #[must_use]
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn marshal(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        ensure_finite(value)?;

        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        check_size(bytes, self.config.max_bytes)?;

        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

fn ensure_finite(value: &Value) -> Result<(), CodecError> {
    match value {
        Value::Float(f) if !f.is_finite() => Err(CodecError::Encode(format!(
            "non-finite float {f} has no JSON representation"
        ))),
        Value::List(items) => items.iter().try_for_each(ensure_finite),
        Value::Map(map) => map.values().try_for_each(ensure_finite),
        _ => Ok(()),
    }
}

///
/// TESTS
///
