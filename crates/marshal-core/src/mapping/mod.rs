//! Map-backed hydration: the `FieldSource` over an untyped mapping and the
//! key transformations applied before it runs.

mod source;
mod transform;

#[cfg(test)]
mod tests;

use crate::{
    error::MarshalError,
    protocol::Serializable,
    registry::{Object, TypeRegistry},
    serialize::JsonCodec,
    value::ValueMap,
};
use std::borrow::Cow;
use tracing::debug;

// re-exports
pub use source::MapSource;
pub use transform::{CONTAINER_KEY, Rule, Transformations};

/// Hydrate a `Serializable` entity from an in-memory mapping.
///
/// Map-backed reads never consult the codec; a default `JsonCodec` is
/// threaded through for nested entities that want one.
pub fn hydrate_from_map(
    entity: &mut dyn Serializable,
    data: &ValueMap,
) -> Result<(), MarshalError> {
    let codec = JsonCodec::default();
    let mut source = MapSource::new(data);

    entity.read_all(&codec, &mut source)
}

/// Construct `type_name` through the registry and hydrate it from `data`
/// after applying `transformations`.
pub fn create_object_from_map(
    registry: &TypeRegistry,
    type_name: &str,
    data: &ValueMap,
    transformations: Option<&Transformations>,
) -> Result<Box<dyn Object>, MarshalError> {
    let mut object = registry.create_object(type_name)?;

    let data = match transformations {
        Some(rules) if !rules.is_empty() => Cow::Owned(rules.apply(data)),
        _ => Cow::Borrowed(data),
    };

    let entity = object.as_serializable_mut().ok_or_else(|| {
        MarshalError::serialization(type_name, "object type is not serializable")
    })?;

    debug!(type_name, keys = data.len(), "creating object from map");
    hydrate_from_map(entity, &data)?;

    Ok(object)
}
