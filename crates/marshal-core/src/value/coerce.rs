//! Lossless-or-narrowing coercions from an untyped `Value` to a requested
//! primitive kind. Each returns `None` when the representation is
//! incompatible; callers turn that into a `TypeMismatch` naming the property.

use crate::{types::Timestamp, value::Value};

// i64::MAX as f64 rounds up to 2^63, which is already out of range.
const I64_UPPER_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0;
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const U64_UPPER_EXCLUSIVE: f64 = 18_446_744_073_709_551_616.0;

impl Value {
    /// Native booleans, or text in the usual boolean spellings
    /// (`true/false`, `t/f`, `1/0`, any case).
    #[must_use]
    pub fn coerce_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => parse_bool(s),
            _ => None,
        }
    }

    /// Integers, in-range unsigned integers, and finite floats (truncated
    /// toward zero), the numeric shape generic data formats produce.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn coerce_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Uint(u) => i64::try_from(*u).ok(),
            Self::Float(f) if f.is_finite() && *f >= I64_LOWER && *f < I64_UPPER_EXCLUSIVE => {
                Some(f.trunc() as i64)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn coerce_i32(&self) -> Option<i32> {
        self.coerce_i64().and_then(|i| i32::try_from(i).ok())
    }

    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn coerce_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(u) => Some(*u),
            Self::Int(i) => u64::try_from(*i).ok(),
            Self::Float(f) if f.is_finite() && *f >= 0.0 && *f < U64_UPPER_EXCLUSIVE => {
                Some(f.trunc() as u64)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn coerce_u32(&self) -> Option<u32> {
        self.coerce_u64().and_then(|u| u32::try_from(u).ok())
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            Self::Uint(u) => Some(*u as f64),
            _ => None,
        }
    }

    /// Narrowed to `f32`; a finite value beyond `f32` range is refused
    /// instead of becoming infinite.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn coerce_f32(&self) -> Option<f32> {
        let f = self.coerce_f64()?;
        let narrowed = f as f32;

        (narrowed.is_finite() || !f.is_finite()).then_some(narrowed)
    }

    /// Text only; numbers are not stringified.
    #[must_use]
    pub fn coerce_text(&self) -> Option<String> {
        self.as_text().map(ToString::to_string)
    }

    /// Blobs, UTF-8 text, or lists of byte-sized integers (the shape JSON
    /// gives a byte array).
    #[must_use]
    pub fn coerce_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::Blob(bytes) => Some(bytes.clone()),
            Self::Text(s) => Some(s.as_bytes().to_vec()),
            Self::List(items) => items
                .iter()
                .map(|item| item.coerce_u64().and_then(|b| u8::try_from(b).ok()))
                .collect(),
            _ => None,
        }
    }

    /// Timestamps, integer milliseconds, or RFC 3339 text.
    #[must_use]
    pub fn coerce_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            Self::Int(ms) => Some(Timestamp::from_millis(*ms)),
            Self::Uint(ms) => i64::try_from(*ms).ok().map(Timestamp::from_millis),
            Self::Text(s) => Timestamp::parse_flexible(s).ok(),
            _ => None,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}
