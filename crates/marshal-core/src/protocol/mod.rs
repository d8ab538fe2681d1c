//! Field Traversal Protocol.
//!
//! An entity writes its field list once, as a pair of `read_all` /
//! `write_all` hooks, and any source or sink can drive it: a decoded wire
//! record, an in-memory mapping, or a test double. Each accessor borrows the
//! field for the duration of the call only.

pub mod record;


use crate::{
    error::MarshalError,
    serialize::Codec,
    traits::FieldValue,
    types::Timestamp,
    value::{Value, ValueMap},
};
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

///
/// FieldSource
///
/// Populates fields from an external representation.
///

pub trait FieldSource {
    fn read_string(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &mut String,
    ) -> Result<(), MarshalError>;

    fn read_i32(&mut self, codec: &dyn Codec, prop: &str, field: &mut i32)
    -> Result<(), MarshalError>;

    fn read_i64(&mut self, codec: &dyn Codec, prop: &str, field: &mut i64)
    -> Result<(), MarshalError>;

    fn read_f32(&mut self, codec: &dyn Codec, prop: &str, field: &mut f32)
    -> Result<(), MarshalError>;

    fn read_f64(&mut self, codec: &dyn Codec, prop: &str, field: &mut f64)
    -> Result<(), MarshalError>;

    fn read_bool(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &mut bool,
    ) -> Result<(), MarshalError>;

    fn read_bytes(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &mut Vec<u8>,
    ) -> Result<(), MarshalError>;

    fn read_timestamp(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &mut Timestamp,
    ) -> Result<(), MarshalError>;

    /// Hydrate a nested entity from the sub-record under `prop`.
    fn read_object(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &mut dyn Serializable,
    ) -> Result<(), MarshalError>;

    fn read_array(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &mut dyn ArrayField,
    ) -> Result<(), MarshalError>;

    fn read_map(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &mut dyn MapField,
    ) -> Result<(), MarshalError>;
}

///
/// FieldSink
///
/// Emits fields into an external representation.
///

pub trait FieldSink {
    fn write_string(&mut self, codec: &dyn Codec, prop: &str, field: &str)
    -> Result<(), MarshalError>;

    fn write_i32(&mut self, codec: &dyn Codec, prop: &str, field: i32) -> Result<(), MarshalError>;

    fn write_i64(&mut self, codec: &dyn Codec, prop: &str, field: i64) -> Result<(), MarshalError>;

    fn write_f32(&mut self, codec: &dyn Codec, prop: &str, field: f32) -> Result<(), MarshalError>;

    fn write_f64(&mut self, codec: &dyn Codec, prop: &str, field: f64) -> Result<(), MarshalError>;

    fn write_bool(&mut self, codec: &dyn Codec, prop: &str, field: bool)
    -> Result<(), MarshalError>;

    fn write_bytes(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &[u8],
    ) -> Result<(), MarshalError>;

    fn write_timestamp(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: Timestamp,
    ) -> Result<(), MarshalError>;

    fn write_object(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &dyn Serializable,
    ) -> Result<(), MarshalError>;

    fn write_array(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &dyn ArrayField,
    ) -> Result<(), MarshalError>;

    fn write_map(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &dyn MapField,
    ) -> Result<(), MarshalError>;
}

///
/// Serializable
///
/// Entity-side hooks. A failed `read_all` leaves the entity partially
/// populated; callers that need all-or-nothing semantics hydrate a copy.
///

pub trait Serializable {
    fn read_all(&mut self, codec: &dyn Codec, source: &mut dyn FieldSource)
    -> Result<(), MarshalError>;

    fn write_all(&self, codec: &dyn Codec, sink: &mut dyn FieldSink) -> Result<(), MarshalError>;
}

///
/// ArrayField
///
/// Element-level support for sequence fields.
///

pub trait ArrayField {
    /// Replace the contents from a decoded sequence.
    fn load_items(&mut self, prop: &str, items: &[Value]) -> Result<(), MarshalError>;

    fn items(&self) -> Vec<Value>;
}

impl<T: FieldValue> ArrayField for Vec<T> {
    fn load_items(&mut self, prop: &str, items: &[Value]) -> Result<(), MarshalError> {
        let loaded = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_value(item).ok_or_else(|| {
                    MarshalError::type_mismatch(
                        format!("{prop}[{index}]"),
                        T::kind().as_str(),
                        item.type_name(),
                    )
                })
            })
            .collect::<Result<Self, _>>()?;

        *self = loaded;

        Ok(())
    }

    fn items(&self) -> Vec<Value> {
        self.iter().map(FieldValue::to_value).collect()
    }
}

///
/// MapField
///
/// Element-level support for string-keyed map fields.
///

pub trait MapField {
    /// Replace the contents from a decoded mapping.
    fn load_entries(&mut self, prop: &str, entries: &ValueMap) -> Result<(), MarshalError>;

    fn entries(&self) -> ValueMap;
}

fn load_entry<T: FieldValue>(prop: &str, key: &str, value: &Value) -> Result<T, MarshalError> {
    T::from_value(value).ok_or_else(|| {
        MarshalError::type_mismatch(
            format!("{prop}.{key}"),
            T::kind().as_str(),
            value.type_name(),
        )
    })
}

impl<T: FieldValue> MapField for BTreeMap<String, T> {
    fn load_entries(&mut self, prop: &str, entries: &ValueMap) -> Result<(), MarshalError> {
        let loaded = entries
            .iter()
            .map(|(key, value)| Ok((key.clone(), load_entry(prop, key, value)?)))
            .collect::<Result<Self, MarshalError>>()?;

        *self = loaded;

        Ok(())
    }

    fn entries(&self) -> ValueMap {
        self.iter()
            .map(|(key, value)| (key.clone(), value.to_value()))
            .collect()
    }
}

impl<T: FieldValue, S: BuildHasher + Default> MapField for HashMap<String, T, S> {
    fn load_entries(&mut self, prop: &str, entries: &ValueMap) -> Result<(), MarshalError> {
        let loaded = entries
            .iter()
            .map(|(key, value)| Ok((key.clone(), load_entry(prop, key, value)?)))
            .collect::<Result<Self, MarshalError>>()?;

        *self = loaded;

        Ok(())
    }

    fn entries(&self) -> ValueMap {
        self.iter()
            .map(|(key, value)| (key.clone(), value.to_value()))
            .collect()
    }
}
