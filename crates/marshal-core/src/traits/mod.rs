use crate::{
    types::{Blob, Timestamp},
    value::{Value, ValueMap},
};
use std::fmt;

///
/// FieldValues
///
/// Read access to an entity's fields by property name.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// FieldValueKind
///
/// Representation a field asks for; named in mismatch diagnostics.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldValueKind {
    Any,
    Bool,
    Bytes,
    Float,
    Int,
    List,
    Map,
    Text,
    Timestamp,
    Uint,
}

impl FieldValueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::Float => "float",
            Self::Int => "int",
            Self::List => "list",
            Self::Map => "map",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uint => "uint",
        }
    }
}

impl fmt::Display for FieldValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// FieldValue
///
/// Conversion boundary between a typed field and an untyped `Value`.
/// `from_value` applies the representation coercions of `Value::coerce_*`
/// and returns `None` when the value cannot become `Self`.
///

pub trait FieldValue {
    fn kind() -> FieldValueKind
    where
        Self: Sized;

    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for String {
    fn kind() -> FieldValueKind {
        FieldValueKind::Text
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.coerce_text()
    }
}

impl FieldValue for Vec<u8> {
    fn kind() -> FieldValueKind {
        FieldValueKind::Bytes
    }

    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.coerce_bytes()
    }
}

impl FieldValue for Blob {
    fn kind() -> FieldValueKind {
        FieldValueKind::Bytes
    }

    fn to_value(&self) -> Value {
        Value::Blob(self.as_bytes().to_vec())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.coerce_bytes().map(Self::from)
    }
}

impl FieldValue for ValueMap {
    fn kind() -> FieldValueKind {
        FieldValueKind::Map
    }

    fn to_value(&self) -> Value {
        Value::Map(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_map().cloned()
    }
}

impl FieldValue for Value {
    fn kind() -> FieldValueKind {
        FieldValueKind::Any
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FieldValue for Vec<String> {
    fn kind() -> FieldValueKind {
        FieldValueKind::List
    }

    fn to_value(&self) -> Value {
        Value::list(self.iter().cloned())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_list()?.iter().map(Value::coerce_text).collect()
    }
}

impl FieldValue for Vec<ValueMap> {
    fn kind() -> FieldValueKind {
        FieldValueKind::List
    }

    fn to_value(&self) -> Value {
        Value::list(self.iter().cloned())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_list()?
            .iter()
            .map(|item| item.as_map().cloned())
            .collect()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn kind() -> FieldValueKind {
        T::kind()
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

// impl_field_value
macro_rules! impl_field_value {
    ( $( $type:ty => $kind:ident, $coerce:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn kind() -> FieldValueKind {
                    FieldValueKind::$kind
                }

                fn to_value(&self) -> Value {
                    Value::from(*self)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    value.$coerce()
                }
            }
        )*
    };
}

impl_field_value!(
    bool => Bool, coerce_bool,
    i32 => Int, coerce_i32,
    i64 => Int, coerce_i64,
    u32 => Uint, coerce_u32,
    u64 => Uint, coerce_u64,
    f32 => Float, coerce_f32,
    f64 => Float, coerce_f64,
    Timestamp => Timestamp, coerce_timestamp,
);

///
/// TESTS
///
