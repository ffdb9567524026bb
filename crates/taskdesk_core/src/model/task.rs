//! Task domain model.
//!
//! # Responsibility
//! - Define the task record, priority and lifecycle status.
//! - Derive the overdue flag from status and due date.
//!
//! # Invariants
//! - New tasks start as `TaskStatus::Pending`.
//! - `project_id`/`assignee_id` must reference existing rows; storage
//!   enforces this with cascading foreign keys.
//! - Overdue is derived on read and never persisted.

use crate::model::project::ProjectId;
use crate::model::user::UserId;
use crate::model::validation::{ensure_not_blank, ValidationError};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned task identifier.
pub type TaskId = i64;

/// Task urgency, persisted as `1|2|3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TaskPriority {
    High = 1,
    Medium = 2,
    Low = 3,
}

impl TaskPriority {
    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for TaskPriority {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            other => Err(ValidationError::InvalidPriority(other)),
        }
    }
}

impl From<TaskPriority> for i64 {
    fn from(value: TaskPriority) -> Self {
        value.as_i64()
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Text form persisted in `tasks.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::InvalidTaskStatus(other.to_string())),
        }
    }
}

/// Unit of work inside a project, assigned to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// `None` until the record is persisted.
    pub id: Option<TaskId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: NaiveDateTime,
    pub project_id: ProjectId,
    pub assignee_id: UserId,
}

impl Task {
    /// Creates an unsaved, pending task.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        priority: TaskPriority,
        due_date: NaiveDateTime,
        project_id: ProjectId,
        assignee_id: UserId,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description,
            priority,
            status: TaskStatus::default(),
            due_date,
            project_id,
            assignee_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank("title", &self.title)
    }

    /// Validates `new_status` and applies it in memory.
    ///
    /// # Contract
    /// - On error the current status is left untouched.
    /// - The caller persists the returned value; this method never writes
    ///   to storage.
    pub fn update_status(&mut self, new_status: &str) -> Result<TaskStatus, ValidationError> {
        let status = new_status.parse::<TaskStatus>()?;
        self.status = status;
        Ok(status)
    }

    /// Whether the task is past due at the current UTC time.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now().naive_utc())
    }

    /// Whether the task is unfinished and `now` is strictly after its due date.
    pub fn is_overdue_at(&self, now: NaiveDateTime) -> bool {
        self.status != TaskStatus::Completed && now > self.due_date
    }
}

/// Partial update for the mutable task columns.
///
/// `description: Some(None)` clears the stored description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDateTime>,
    pub project_id: Option<ProjectId>,
    pub assignee_id: Option<UserId>,
}

impl TaskUpdate {
    /// Returns `true` when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.project_id.is_none()
            && self.assignee_id.is_none()
    }
}
