use crate::{
    error::MarshalError,
    serialize::{CborCodec, CodecConfig, JsonCodec},
};
use serde::Deserialize;

/// Keys `Hydrator::set_values` never lets a caller overwrite.
pub const PROTECTED_FIELDS: [&str; 6] = [
    "Id",
    "IsNew",
    "CreatedBy",
    "UpdatedBy",
    "CreatedAt",
    "UpdatedAt",
];

///
/// HydrateConfig
///
/// Runtime knobs for the hydrator and the reference codecs. Every field has
/// a default, so a partial document is enough.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct HydrateConfig {
    /// Deepest nested-entity level the hydrator will build.
    pub max_depth: usize,

    /// Keys stripped by `set_values`.
    pub protected_fields: Vec<String>,

    /// Skip keys with no matching field instead of failing.
    pub ignore_unknown: bool,

    pub codec: CodecConfig,
}

impl HydrateConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, MarshalError> {
        serde_json::from_str(json)
            .map_err(|e| MarshalError::bad_argument(format!("invalid hydrate config: {e}")))
    }

    /// CBOR codec bounded by `codec.max_bytes`.
    #[must_use]
    pub const fn cbor_codec(&self) -> CborCodec {
        CborCodec::new(self.codec)
    }

    /// JSON codec bounded by `codec.max_bytes`.
    #[must_use]
    pub const fn json_codec(&self) -> JsonCodec {
        JsonCodec::new(self.codec)
    }
}

impl Default for HydrateConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            protected_fields: PROTECTED_FIELDS.iter().map(ToString::to_string).collect(),
            ignore_unknown: true,
            codec: CodecConfig::default(),
        }
    }
}

///
/// TESTS
///
