use crate::{
    Hydrate,
    error::MarshalError,
    protocol::{FieldSink, FieldSource, Serializable},
    serialize::Codec,
};
use ulid::Ulid;

///
/// IdentityInfo
///
/// Owns the `Id` property. A fresh value already carries a ULID, so an
/// entity has its identity from construction on.
///

#[derive(Clone, Debug, Eq, Hash, Hydrate, PartialEq)]
#[marshal(name = "IdentityInfo", serializable)]
pub struct IdentityInfo {
    id: String,
}

impl IdentityInfo {
    pub const ID: &'static str = "Id";

    #[must_use]
    pub fn new() -> Self {
        Self {
            id: generate_id(),
        }
    }

    /// Wrap an existing identity without generating one.
    #[must_use]
    pub fn from_id(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Generate an identity only if none is set; an existing one is kept.
    pub fn ensure_id(&mut self) -> &str {
        if self.id.is_empty() {
            self.id = generate_id();
        }

        &self.id
    }
}

impl Default for IdentityInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializable for IdentityInfo {
    fn read_all(
        &mut self,
        codec: &dyn Codec,
        source: &mut dyn FieldSource,
    ) -> Result<(), MarshalError> {
        source.read_string(codec, Self::ID, &mut self.id)
    }

    fn write_all(&self, codec: &dyn Codec, sink: &mut dyn FieldSink) -> Result<(), MarshalError> {
        sink.write_string(codec, Self::ID, &self.id)
    }
}

fn generate_id() -> String {
    Ulid::new().to_string()
}
