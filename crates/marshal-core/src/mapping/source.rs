use crate::{
    error::MarshalError,
    protocol::{ArrayField, FieldSource, MapField, Serializable},
    serialize::Codec,
    traits::FieldValue,
    types::Timestamp,
    value::{Value, ValueMap},
};
use tracing::trace;

///
/// MapSource
///
/// `FieldSource` over an in-memory mapping, so an entity wired for the wire
/// path can be hydrated from configuration or request data with the same
/// `read_all`.
///
/// Absent keys and explicit nulls are no-ops: the field keeps its current
/// value. Sparse updates rely on this. A present value that cannot be
/// coerced fails with `TypeMismatch` naming the property.
///

#[derive(Clone, Copy, Debug)]
pub struct MapSource<'a> {
    map: &'a ValueMap,
}

impl<'a> MapSource<'a> {
    #[must_use]
    pub const fn new(map: &'a ValueMap) -> Self {
        Self { map }
    }

    fn lookup(&self, prop: &str) -> Option<&'a Value> {
        self.map.get(prop).filter(|value| !value.is_null())
    }

    fn read_scalar<T: FieldValue>(&self, prop: &str, field: &mut T) -> Result<(), MarshalError> {
        if let Some(value) = self.lookup(prop) {
            *field = T::from_value(value).ok_or_else(|| {
                MarshalError::type_mismatch(prop, T::kind().as_str(), value.type_name())
            })?;
        }

        Ok(())
    }
}

impl FieldSource for MapSource<'_> {
    fn read_string(
        &mut self,
        _: &dyn Codec,
        prop: &str,
        field: &mut String,
    ) -> Result<(), MarshalError> {
        self.read_scalar(prop, field)
    }

    fn read_i32(&mut self, _: &dyn Codec, prop: &str, field: &mut i32) -> Result<(), MarshalError> {
        self.read_scalar(prop, field)
    }

    fn read_i64(&mut self, _: &dyn Codec, prop: &str, field: &mut i64) -> Result<(), MarshalError> {
        self.read_scalar(prop, field)
    }

    fn read_f32(&mut self, _: &dyn Codec, prop: &str, field: &mut f32) -> Result<(), MarshalError> {
        self.read_scalar(prop, field)
    }

    fn read_f64(&mut self, _: &dyn Codec, prop: &str, field: &mut f64) -> Result<(), MarshalError> {
        self.read_scalar(prop, field)
    }

    fn read_bool(
        &mut self,
        _: &dyn Codec,
        prop: &str,
        field: &mut bool,
    ) -> Result<(), MarshalError> {
        self.read_scalar(prop, field)
    }

    fn read_bytes(
        &mut self,
        _: &dyn Codec,
        prop: &str,
        field: &mut Vec<u8>,
    ) -> Result<(), MarshalError> {
        self.read_scalar(prop, field)
    }

    fn read_timestamp(
        &mut self,
        _: &dyn Codec,
        prop: &str,
        field: &mut Timestamp,
    ) -> Result<(), MarshalError> {
        self.read_scalar(prop, field)
    }

    fn read_object(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &mut dyn Serializable,
    ) -> Result<(), MarshalError> {
        match self.lookup(prop) {
            None => Ok(()),
            Some(Value::Map(sub)) => {
                trace!(property = prop, keys = sub.len(), "reading nested object");

                let mut nested = MapSource::new(sub);
                field
                    .read_all(codec, &mut nested)
                    .map_err(|err| err.with_field(prop))
            }
            Some(other) => Err(MarshalError::type_mismatch(
                prop,
                "map",
                other.type_name(),
            )),
        }
    }

    fn read_array(
        &mut self,
        _: &dyn Codec,
        prop: &str,
        field: &mut dyn ArrayField,
    ) -> Result<(), MarshalError> {
        match self.lookup(prop) {
            None => Ok(()),
            Some(Value::List(items)) => field.load_items(prop, items),
            Some(other) => Err(MarshalError::type_mismatch(
                prop,
                "list",
                other.type_name(),
            )),
        }
    }

    fn read_map(
        &mut self,
        _: &dyn Codec,
        prop: &str,
        field: &mut dyn MapField,
    ) -> Result<(), MarshalError> {
        match self.lookup(prop) {
            None => Ok(()),
            Some(Value::Map(entries)) => field.load_entries(prop, entries),
            Some(other) => Err(MarshalError::type_mismatch(
                prop,
                "map",
                other.type_name(),
            )),
        }
    }
}
