//! Validation errors raised by entity constructors and status mutations.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected entity input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Role is not one of `admin|manager|developer`.
    InvalidRole(String),
    /// Project status is not one of `active|completed|on_hold`.
    InvalidProjectStatus(String),
    /// Task status is not one of `pending|in_progress|completed`.
    InvalidTaskStatus(String),
    /// Task priority is not one of `1|2|3`.
    InvalidPriority(i64),
    /// Required text field is empty after trim.
    BlankField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(value) => write!(
                f,
                "invalid role `{value}`; expected admin|manager|developer"
            ),
            Self::InvalidProjectStatus(value) => write!(
                f,
                "invalid project status `{value}`; expected active|completed|on_hold"
            ),
            Self::InvalidTaskStatus(value) => write!(
                f,
                "invalid task status `{value}`; expected pending|in_progress|completed"
            ),
            Self::InvalidPriority(value) => {
                write!(f, "invalid task priority `{value}`; expected 1|2|3")
            }
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn ensure_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}
