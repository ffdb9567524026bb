//! User domain model.
//!
//! # Responsibility
//! - Define the user record and its role label.
//! - Apply in-memory profile edits with role validation.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes afterwards.
//! - `registration_date` is fixed at construction and has no update path.
//! - `username` and `email` are non-blank.

use crate::model::validation::{ensure_not_blank, ValidationError};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned user identifier.
pub type UserId = i64;

/// Stored role label. Not enforced as a permission model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Developer,
}

impl UserRole {
    /// Text form persisted in `users.role`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Developer => "developer",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "developer" => Ok(Self::Developer),
            other => Err(ValidationError::InvalidRole(other.to_string())),
        }
    }
}

/// Application user that tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// `None` until the record is persisted.
    pub id: Option<UserId>,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    /// UTC wall-clock time of construction.
    pub registration_date: NaiveDateTime,
}

impl User {
    /// Creates an unsaved user registered now.
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self::registered_at(username, email, role, Utc::now().naive_utc())
    }

    /// Creates an unsaved user with an explicit registration time.
    pub fn registered_at(
        username: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        registration_date: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            role,
            registration_date,
        }
    }

    /// Checks field-level invariants that storage cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank("username", &self.username)?;
        ensure_not_blank("email", &self.email)?;
        Ok(())
    }

    /// Applies the set fields of `changes` to this in-memory record.
    ///
    /// Nothing is applied when any provided text field is blank.
    pub fn update_info(&mut self, changes: &UserUpdate) -> Result<(), ValidationError> {
        if let Some(username) = changes.username.as_deref() {
            ensure_not_blank("username", username)?;
        }
        if let Some(email) = changes.email.as_deref() {
            ensure_not_blank("email", email)?;
        }

        if let Some(username) = &changes.username {
            self.username = username.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        Ok(())
    }
}

/// Partial update for the mutable user columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl UserUpdate {
    /// Returns `true` when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.role.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{User, UserRole, UserUpdate};
    use crate::model::ValidationError;

    #[test]
    fn role_parses_known_labels_only() {
        assert_eq!("manager".parse::<UserRole>(), Ok(UserRole::Manager));
        assert_eq!(
            "owner".parse::<UserRole>(),
            Err(ValidationError::InvalidRole("owner".to_string()))
        );
    }

    #[test]
    fn update_info_rejects_blank_email_without_partial_apply() {
        let mut user = User::new("ann", "ann@example.com", UserRole::Developer);
        let changes = UserUpdate {
            username: Some("anna".to_string()),
            email: Some("  ".to_string()),
            role: None,
        };

        let err = user.update_info(&changes).unwrap_err();
        assert_eq!(err, ValidationError::BlankField("email"));
        assert_eq!(user.username, "ann");
    }
}
