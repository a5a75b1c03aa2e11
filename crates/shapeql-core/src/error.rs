use crate::value::EncodeError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Failures raised while building or compiling a query.
/// Every failure is local and synchronous; none yields partial output.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("unsupported field selector '{selector}': {reason}")]
    UnsupportedSelector { selector: String, reason: String },

    #[error("duplicate parameter '{name}' on field {field}")]
    DuplicateParameter { field: String, name: String },

    #[error("cyclic shape: type {type_name} re-entered at '{path}'")]
    CyclicShape { type_name: String, path: String },

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl QueryError {
    pub(crate) fn unsupported_selector(
        selector: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnsupportedSelector { .. } | Self::DuplicateParameter { .. } => {
                ErrorClass::Usage
            }
            Self::CyclicShape { .. } => ErrorClass::Structure,
            Self::Encode(_) => ErrorClass::Encode,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
///
/// Stable classification of `QueryError` variants.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    /// The caller misused the builder API (bad selector, repeated parameter).
    Usage,

    /// The shape itself cannot be compiled (self-referential types).
    Structure,

    /// A parameter value has no literal form.
    Encode,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Usage => "usage",
            Self::Structure => "structure",
            Self::Encode => "encode",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
