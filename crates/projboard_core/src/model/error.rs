//! Domain error for model-level operations.
//!
//! # Responsibility
//! - Carry enough context (kind, entity, index/value) for the command layer
//!   to build a distinguishable user-facing message.
//!
//! # Invariants
//! - Model code returns these errors and never prints or logs them.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ModelResult<T> = Result<T, ModelError>;

/// Failure kinds raised by roster, board, task and project operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Lookup by index number or handle found nothing.
    NotFound { entity: &'static str, index: String },
    /// Positional access outside `[1, len]`.
    IndexOutOfRange {
        entity: &'static str,
        index: usize,
        len: usize,
    },
    /// Unknown edit field token.
    InvalidField(String),
    /// Field token is known but the value does not parse.
    InvalidValue { field: &'static str, value: String },
    /// Date text does not match `DD/MM/YYYY`.
    InvalidDate(String),
    /// Unknown task state token.
    InvalidState(String),
    /// Project name is blank or contains reserved characters.
    InvalidProjectName(String),
    /// Raw command text could not be turned into a domain object.
    ConstructionFailed(String),
}

impl ModelError {
    pub(crate) fn not_found(entity: &'static str, index: impl ToString) -> Self {
        Self::NotFound {
            entity,
            index: index.to_string(),
        }
    }

    pub(crate) fn out_of_range(entity: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { entity, index, len }
    }
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, index } => write!(f, "{entity} not found: {index}"),
            Self::IndexOutOfRange { entity, index, len } => {
                if *len == 0 {
                    write!(f, "{entity} number {index} is out of range: there are none")
                } else {
                    write!(
                        f,
                        "{entity} number {index} is out of range: expected 1 to {len}"
                    )
                }
            }
            Self::InvalidField(field) => write!(f, "invalid field: `{field}`"),
            Self::InvalidValue { field, value } => {
                write!(f, "invalid value for {field}: `{value}`")
            }
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected DD/MM/YYYY")
            }
            Self::InvalidState(value) => {
                write!(f, "invalid task state `{value}`; expected open|todo|doing|done")
            }
            Self::InvalidProjectName(value) => write!(f, "invalid project name: `{value}`"),
            Self::ConstructionFailed(details) => write!(f, "could not construct: {details}"),
        }
    }
}

impl Error for ModelError {}
