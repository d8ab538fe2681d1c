//! Reflective hydration.
//!
//! `#[derive(Hydrate)]` gives every entity a field table that maps property
//! names to typed slots. The `Hydrator` walks an untyped mapping against that
//! table, coercing scalars and building nested entities through the
//! `TypeRegistry`.

mod hydrator;


use crate::{
    error::MarshalError,
    registry::{Object, Registered, downcast_object},
    traits::{FieldValue, FieldValues},
    types::{Blob, Timestamp},
    value::{Value, ValueMap},
};

// re-exports
pub use hydrator::{FieldProcessor, Hydrator, get_object_fields};

///
/// Hydrate
///
/// Name-addressed field table. Names promoted from flattened mixins resolve
/// here as well; skipped fields never do.
///

pub trait Hydrate {
    fn field_target(&mut self, name: &str) -> Option<&mut dyn FieldTarget>;

    fn field_names(&self) -> Vec<&'static str>;
}

///
/// FieldTarget
///
/// A field the hydrator can assign. `slot` tells it which assignment rule
/// applies; `value` reads the field back.
///

pub trait FieldTarget {
    fn slot(&mut self) -> FieldSlot<'_>;

    fn value(&self) -> Value;
}

///
/// FieldSlot
///

pub enum FieldSlot<'a> {
    /// Direct representation conversion through `FieldValue`.
    Scalar(&'a mut dyn ScalarTarget),

    /// `Vec<String>`, from a sequence of text values.
    TextList(&'a mut Vec<String>),

    /// `Vec<ValueMap>`, from a sequence of mappings.
    MapList(&'a mut Vec<ValueMap>),

    /// Nested entity, built through the registry.
    Entity(&'a mut dyn EntityTarget),
}

///
/// ScalarTarget
///

pub trait ScalarTarget {
    fn assign(&mut self, property: &str, value: &Value) -> Result<(), MarshalError>;
}

impl<T: FieldValue> ScalarTarget for T {
    fn assign(&mut self, property: &str, value: &Value) -> Result<(), MarshalError> {
        *self = T::from_value(value).ok_or_else(|| {
            MarshalError::type_mismatch(property, T::kind().as_str(), value.type_name())
        })?;

        Ok(())
    }
}

///
/// EntityTarget
///
/// A nested-entity field. `registered_name` mirrors the registry lookup:
/// the canonical name of the declared type and whether the field holds it
/// by reference (`Box<T>`) or by value.
///

pub trait EntityTarget {
    fn registered_name(&self) -> (&'static str, bool);

    /// Move a freshly hydrated registry object into the field.
    fn assign_object(&mut self, property: &str, object: Box<dyn Object>)
    -> Result<(), MarshalError>;
}

impl<T> FieldTarget for Box<T>
where
    T: EntityTarget + FieldTarget + Registered + 'static,
{
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Entity(self)
    }

    fn value(&self) -> Value {
        (**self).value()
    }
}

impl<T> EntityTarget for Box<T>
where
    T: EntityTarget + FieldTarget + Registered + 'static,
{
    fn registered_name(&self) -> (&'static str, bool) {
        (T::TYPE_NAME, true)
    }

    fn assign_object(
        &mut self,
        property: &str,
        object: Box<dyn Object>,
    ) -> Result<(), MarshalError> {
        *self = downcast_object::<T>(property, object)?;

        Ok(())
    }
}

/// Collect every named field of an entity into a mapping.
#[must_use]
pub fn to_value_map<T: Hydrate + FieldValues + ?Sized>(entity: &T) -> ValueMap {
    entity
        .field_names()
        .into_iter()
        .filter_map(|name| entity.get_value(name).map(|value| (name, value)))
        .collect()
}

// impl_scalar_target
macro_rules! impl_scalar_target {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl FieldTarget for $type {
                fn slot(&mut self) -> FieldSlot<'_> {
                    FieldSlot::Scalar(self)
                }

                fn value(&self) -> Value {
                    FieldValue::to_value(self)
                }
            }
        )*
    };
}

impl_scalar_target!(
    bool,
    i32,
    i64,
    u32,
    u64,
    f32,
    f64,
    String,
    Timestamp,
    Blob,
    Vec<u8>,
    ValueMap,
    Value,
);

impl<T: FieldValue> FieldTarget for Option<T> {
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Scalar(self)
    }

    fn value(&self) -> Value {
        FieldValue::to_value(self)
    }
}

impl FieldTarget for Vec<String> {
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::TextList(self)
    }

    fn value(&self) -> Value {
        FieldValue::to_value(self)
    }
}

impl FieldTarget for Vec<ValueMap> {
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::MapList(self)
    }

    fn value(&self) -> Value {
        FieldValue::to_value(self)
    }
}
