// ─── Error ──────────────────────────────────────────────────────────────────
use smol_str::SmolStr;
use thiserror::Error;

use crate::types::MAX_CONSTRUCT_ARGS;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    #[error("Invalid builder construction: arguments did not match any valid signature{reason}")]
    InvalidConstruction { reason: ConstructionFailure },
    #[error("`{name}` is not a setter (expected `set` followed by an uppercase or caseless character)")]
    NotASetter { name: SmolStr },
}

/// Why a construction argument list matched no call shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionFailure {
    /// A lone non-object value was given without the field name to store it under.
    MissingFieldName { value_kind: &'static str },
    /// Two arguments were given but the second one is not a string.
    FieldNameNotString { name_kind: &'static str },
    /// More arguments than any call shape accepts.
    TooManyArguments { count: usize },
}

impl std::fmt::Display for ConstructionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructionFailure::MissingFieldName { value_kind } => write!(
                f,
                "; the field name (second argument) is required when the value is not an object (got {value_kind})"
            ),
            ConstructionFailure::FieldNameNotString { name_kind } => {
                write!(f, "; the field name must be a string, got {name_kind}")
            }
            ConstructionFailure::TooManyArguments { count } => {
                write!(f, "; expected at most {MAX_CONSTRUCT_ARGS} arguments, got {count}")
            }
        }
    }
}

impl BuilderError {
    pub(crate) fn construction(reason: ConstructionFailure) -> Self {
        BuilderError::InvalidConstruction { reason }
    }
}
