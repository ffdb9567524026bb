//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide task CRUD plus lookups by project, assignee and text.
//!
//! # Invariants
//! - `project_id`/`assignee_id` must reference existing rows; SQLite rejects
//!   dangling references as integrity errors.
//! - Text search matches a literal substring of `title` or `description`
//!   with SQLite `LIKE` semantics: ASCII letters compare case-insensitively,
//!   other characters compare exactly.

use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskId, TaskPriority, TaskUpdate};
use crate::model::user::UserId;
use crate::model::validation::ensure_not_blank;
use crate::repo::codec::{
    enum_column, like_pattern, optional_text, query_all, query_optional, timestamp_column,
    timestamp_to_db, Assignments,
};
use crate::repo::{RepoError, RepoResult, SqliteStore};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    priority,
    status,
    due_date,
    project_id,
    assignee_id
FROM tasks";

/// Repository interface for task records.
pub trait TaskRepository {
    /// Inserts `task`, stores the assigned id on it and returns that id.
    fn create_task(&self, task: &mut Task) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists all tasks in insertion order.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Writes the set fields of `changes`; an empty update is a no-op.
    fn update_task(&self, id: TaskId, changes: &TaskUpdate) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    /// Tasks whose title or description contains `needle`.
    fn search_tasks(&self, needle: &str) -> RepoResult<Vec<Task>>;
    fn tasks_by_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>>;
    fn tasks_by_assignee(&self, assignee_id: UserId) -> RepoResult<Vec<Task>>;
}

impl TaskRepository for SqliteStore {
    fn create_task(&self, task: &mut Task) -> RepoResult<TaskId> {
        task.validate()?;

        let id = self.with_connection("create_task", |conn| {
            conn.execute(
                "INSERT INTO tasks (
                    title,
                    description,
                    priority,
                    status,
                    due_date,
                    project_id,
                    assignee_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    task.title.as_str(),
                    task.description.as_deref(),
                    task.priority.as_i64(),
                    task.status.as_str(),
                    timestamp_to_db(task.due_date),
                    task.project_id,
                    task.assignee_id,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        task.id = Some(id);
        Ok(id)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.with_connection("get_task", |conn| {
            query_optional(
                conn,
                &format!("{TASK_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_task_row,
            )
        })
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.with_connection("list_tasks", |conn| {
            query_all(
                conn,
                &format!("{TASK_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_task_row,
            )
        })
    }

    fn update_task(&self, id: TaskId, changes: &TaskUpdate) -> RepoResult<()> {
        let mut assignments = Assignments::default();
        if let Some(title) = &changes.title {
            ensure_not_blank("title", title)?;
            assignments.set("title", Value::Text(title.clone()));
        }
        if let Some(description) = &changes.description {
            assignments.set("description", optional_text(description.as_deref()));
        }
        if let Some(priority) = changes.priority {
            assignments.set("priority", Value::Integer(priority.as_i64()));
        }
        if let Some(status) = changes.status {
            assignments.set("status", Value::Text(status.as_str().to_string()));
        }
        if let Some(due_date) = changes.due_date {
            assignments.set("due_date", Value::Text(timestamp_to_db(due_date)));
        }
        if let Some(project_id) = changes.project_id {
            assignments.set("project_id", Value::Integer(project_id));
        }
        if let Some(assignee_id) = changes.assignee_id {
            assignments.set("assignee_id", Value::Integer(assignee_id));
        }
        if assignments.is_empty() {
            return Ok(());
        }

        let changed = self.with_connection("update_task", move |conn| {
            assignments.execute(conn, "tasks", id)
        })?;
        debug!("event=task_update module=repo status=ok task_id={id} changed={changed}");
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.with_connection("delete_task", |conn| {
            Ok(conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?)
        })?;
        debug!("event=task_delete module=repo status=ok task_id={id} changed={changed}");
        Ok(())
    }

    fn search_tasks(&self, needle: &str) -> RepoResult<Vec<Task>> {
        let pattern = like_pattern(needle);
        self.with_connection("search_tasks", |conn| {
            query_all(
                conn,
                &format!(
                    "{TASK_SELECT_SQL}
                     WHERE title LIKE ?1 ESCAPE '\\'
                        OR description LIKE ?1 ESCAPE '\\'
                     ORDER BY id ASC;"
                ),
                [pattern.as_str()],
                parse_task_row,
            )
        })
    }

    fn tasks_by_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        self.with_connection("tasks_by_project", |conn| {
            query_all(
                conn,
                &format!("{TASK_SELECT_SQL} WHERE project_id = ?1 ORDER BY id ASC;"),
                [project_id],
                parse_task_row,
            )
        })
    }

    fn tasks_by_assignee(&self, assignee_id: UserId) -> RepoResult<Vec<Task>> {
        self.with_connection("tasks_by_assignee", |conn| {
            query_all(
                conn,
                &format!("{TASK_SELECT_SQL} WHERE assignee_id = ?1 ORDER BY id ASC;"),
                [assignee_id],
                parse_task_row,
            )
        })
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let priority_value: i64 = row.get("priority")?;
    let priority = TaskPriority::try_from(priority_value)
        .map_err(|err| RepoError::InvalidData(format!("{err} in priority")))?;

    Ok(Task {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        description: row.get("description")?,
        priority,
        status: enum_column(row, "status")?,
        due_date: timestamp_column(row, "due_date")?,
        project_id: row.get("project_id")?,
        assignee_id: row.get("assignee_id")?,
    })
}
