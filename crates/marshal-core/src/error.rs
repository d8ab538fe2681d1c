use crate::serialize::CodecError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// MarshalError
///
/// Failure raised by the traversal protocol, the map adapter, the hydrator
/// and the registry. Errors raised beneath a nested property are wrapped in
/// `Context` so callers can see where hydration stopped.
///

#[derive(Debug, ThisError)]
pub enum MarshalError {
    #[error("type mismatch for '{property}': expected {expected}, found {found}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("serialization error for '{property}': {message}")]
    Serialization { property: String, message: String },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("type '{type_name}' is not registered")]
    MissingType { type_name: String },

    #[error("bad argument: {message}")]
    BadArgument { message: String },

    #[error("{path}: {source}")]
    Context {
        path: String,
        #[source]
        source: Box<Self>,
    },
}

impl MarshalError {
    pub fn type_mismatch(
        property: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            property: property.into(),
            expected,
            found,
        }
    }

    pub fn serialization(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            property: property.into(),
            message: message.into(),
        }
    }

    pub fn missing_type(type_name: impl Into<String>) -> Self {
        Self::MissingType {
            type_name: type_name.into(),
        }
    }

    pub fn bad_argument(message: impl Into<String>) -> Self {
        Self::BadArgument {
            message: message.into(),
        }
    }

    /// Stable classification, looking through any path context.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Serialization { .. } | Self::Codec(_) => ErrorKind::Serialization,
            Self::MissingType { .. } => ErrorKind::MissingType,
            Self::BadArgument { .. } => ErrorKind::BadArgument,
            Self::Context { source, .. } => source.kind(),
        }
    }

    /// Prepend a property segment to the error path.
    #[must_use]
    pub fn with_field(self, field: impl AsRef<str>) -> Self {
        self.with_path_segment(field.as_ref())
    }

    /// Prepend an index segment to the error path.
    #[must_use]
    pub fn with_index(self, index: usize) -> Self {
        self.with_path_segment(format!("[{index}]"))
    }

    /// Full dotted path of the failure, if it happened below a nested property.
    #[must_use]
    pub const fn path(&self) -> Option<&str> {
        match self {
            Self::Context { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Innermost, non-context error.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.leaf(),
            _ => self,
        }
    }

    fn with_path_segment(self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        match self {
            Self::Context { path, source } => Self::Context {
                path: join_segments(&segment, &path),
                source,
            },
            source => Self::Context {
                path: segment,
                source: Box::new(source),
            },
        }
    }
}

fn join_segments(prefix: &str, suffix: &str) -> String {
    if suffix.starts_with('[') {
        format!("{prefix}{suffix}")
    } else {
        format!("{prefix}.{suffix}")
    }
}

///
/// ErrorKind
///
/// Stable error taxonomy independent of message text.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    TypeMismatch,
    Serialization,
    MissingType,
    BadArgument,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::Serialization => "serialization",
            Self::MissingType => "missing_type",
            Self::BadArgument => "bad_argument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// TESTS
///
