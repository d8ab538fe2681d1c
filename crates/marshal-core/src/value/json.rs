use crate::{
    error::MarshalError,
    value::{Value, ValueMap},
};
use serde_json::Value as JsonValue;

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Uint(u)
                } else {
                    n.as_f64().map_or(Self::Null, Self::Float)
                }
            }
            JsonValue::String(s) => Self::Text(s),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<JsonValue> for ValueMap {
    type Error = MarshalError;

    fn try_from(json: JsonValue) -> Result<Self, Self::Error> {
        match Value::from(json) {
            Value::Map(map) => Ok(map),
            other => Err(MarshalError::bad_argument(format!(
                "expected a JSON object, found {}",
                other.type_name()
            ))),
        }
    }
}

impl ValueMap {
    /// Parse a JSON document whose top level is an object.
    pub fn from_json_str(json: &str) -> Result<Self, MarshalError> {
        let doc: JsonValue = serde_json::from_str(json)
            .map_err(|e| MarshalError::bad_argument(format!("invalid JSON document: {e}")))?;

        Self::try_from(doc)
    }
}
