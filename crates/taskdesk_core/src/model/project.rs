//! Project domain model.
//!
//! # Responsibility
//! - Define the project record and its lifecycle status.
//! - Compute schedule progress from the start/end window.
//!
//! # Invariants
//! - New projects start as `ProjectStatus::Active`.
//! - Progress is derived on read and never persisted.
//! - Progress uses whole-day deltas and is always within `0.0..=100.0`.

use crate::model::validation::{ensure_not_blank, ValidationError};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned project identifier.
pub type ProjectId = i64;

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    /// Text form persisted in `projects.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "on_hold" => Ok(Self::OnHold),
            other => Err(ValidationError::InvalidProjectStatus(other.to_string())),
        }
    }
}

/// Project grouping tasks under a scheduled window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// `None` until the record is persisted.
    pub id: Option<ProjectId>,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates an unsaved, active project.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            start_date,
            end_date,
            status: ProjectStatus::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank("name", &self.name)
    }

    /// Validates `new_status` and applies it in memory.
    ///
    /// # Contract
    /// - On error the current status is left untouched.
    /// - The caller persists the returned value; this method never writes
    ///   to storage.
    pub fn update_status(&mut self, new_status: &str) -> Result<ProjectStatus, ValidationError> {
        let status = new_status.parse::<ProjectStatus>()?;
        self.status = status;
        Ok(status)
    }

    /// Progress percentage at the current UTC time.
    pub fn progress(&self) -> f64 {
        self.progress_at(Utc::now().naive_utc())
    }

    /// Progress percentage evaluated at `now`, rounded to two decimals.
    ///
    /// - Window of zero or negative whole days: `100.0` if completed, else `0.0`.
    /// - Completed projects always report `100.0`.
    /// - Otherwise elapsed whole days over window days, clamped to `0..=100`.
    pub fn progress_at(&self, now: NaiveDateTime) -> f64 {
        let completed = self.status == ProjectStatus::Completed;
        let total_days = self.end_date.signed_duration_since(self.start_date).num_days();
        if total_days <= 0 {
            return if completed { 100.0 } else { 0.0 };
        }
        if completed {
            return 100.0;
        }

        let elapsed_days = now.signed_duration_since(self.start_date).num_days();
        let ratio = elapsed_days as f64 / total_days as f64 * 100.0;
        round_hundredths(ratio.clamp(0.0, 100.0))
    }
}

/// Partial update for the mutable project columns.
///
/// `description: Some(None)` clears the stored description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub status: Option<ProjectStatus>,
}

impl ProjectUpdate {
    /// Returns `true` when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
