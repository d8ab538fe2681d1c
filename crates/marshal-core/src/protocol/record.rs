use crate::{
    error::MarshalError,
    mapping::MapSource,
    protocol::{ArrayField, FieldSink, MapField, Serializable},
    serialize::Codec,
    types::Timestamp,
    value::{Value, ValueMap},
};

///
/// RecordSink
///
/// `FieldSink` that collects an entity into a `ValueMap`, one entry per
/// property. Nested entities become nested maps.
///

#[derive(Debug, Default)]
pub struct RecordSink {
    record: ValueMap,
}

impl RecordSink {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            record: ValueMap::new(),
        }
    }

    #[must_use]
    pub fn into_record(self) -> ValueMap {
        self.record
    }

    fn put(&mut self, prop: &str, value: impl Into<Value>) -> Result<(), MarshalError> {
        self.record.insert(prop, value);

        Ok(())
    }
}

impl FieldSink for RecordSink {
    fn write_string(&mut self, _: &dyn Codec, prop: &str, field: &str) -> Result<(), MarshalError> {
        self.put(prop, field)
    }

    fn write_i32(&mut self, _: &dyn Codec, prop: &str, field: i32) -> Result<(), MarshalError> {
        self.put(prop, field)
    }

    fn write_i64(&mut self, _: &dyn Codec, prop: &str, field: i64) -> Result<(), MarshalError> {
        self.put(prop, field)
    }

    fn write_f32(&mut self, _: &dyn Codec, prop: &str, field: f32) -> Result<(), MarshalError> {
        self.put(prop, field)
    }

    fn write_f64(&mut self, _: &dyn Codec, prop: &str, field: f64) -> Result<(), MarshalError> {
        self.put(prop, field)
    }

    fn write_bool(&mut self, _: &dyn Codec, prop: &str, field: bool) -> Result<(), MarshalError> {
        self.put(prop, field)
    }

    fn write_bytes(&mut self, _: &dyn Codec, prop: &str, field: &[u8]) -> Result<(), MarshalError> {
        self.put(prop, Value::Blob(field.to_vec()))
    }

    fn write_timestamp(
        &mut self,
        _: &dyn Codec,
        prop: &str,
        field: Timestamp,
    ) -> Result<(), MarshalError> {
        self.put(prop, field)
    }

    fn write_object(
        &mut self,
        codec: &dyn Codec,
        prop: &str,
        field: &dyn Serializable,
    ) -> Result<(), MarshalError> {
        let mut nested = Self::new();
        field
            .write_all(codec, &mut nested)
            .map_err(|err| err.with_field(prop))?;

        self.put(prop, nested.into_record())
    }

    fn write_array(
        &mut self,
        _: &dyn Codec,
        prop: &str,
        field: &dyn ArrayField,
    ) -> Result<(), MarshalError> {
        self.put(prop, Value::List(field.items()))
    }

    fn write_map(
        &mut self,
        _: &dyn Codec,
        prop: &str,
        field: &dyn MapField,
    ) -> Result<(), MarshalError> {
        self.put(prop, field.entries())
    }
}

/// Collect an entity into a record without encoding it.
pub fn to_record(codec: &dyn Codec, entity: &dyn Serializable) -> Result<ValueMap, MarshalError> {
    let mut sink = RecordSink::new();
    entity.write_all(codec, &mut sink)?;

    Ok(sink.into_record())
}

/// Encode an entity through `codec`.
pub fn to_bytes(codec: &dyn Codec, entity: &dyn Serializable) -> Result<Vec<u8>, MarshalError> {
    let record = to_record(codec, entity)?;
    let bytes = codec.marshal(&Value::Map(record))?;

    Ok(bytes)
}

/// Decode `bytes` through `codec` and hydrate `entity` from the record.
///
/// Properties missing from the payload leave their fields untouched.
pub fn from_bytes(
    codec: &dyn Codec,
    bytes: &[u8],
    entity: &mut dyn Serializable,
) -> Result<(), MarshalError> {
    let record = match codec.unmarshal(bytes)? {
        Value::Map(record) => record,
        other => {
            return Err(MarshalError::serialization(
                "<record>",
                format!(
                    "{} payload decoded to {}, expected a map",
                    codec.name(),
                    other.type_name()
                ),
            ));
        }
    };

    let mut source = MapSource::new(&record);
    entity.read_all(codec, &mut source)
}
