//! Project repository contract and SQLite implementation.
//!
//! # Invariants
//! - `status` is persisted exactly as validated by `ProjectStatus`.
//! - Start/end dates are stored as ISO-8601 text.
//! - Deleting a project cascades to its tasks.

use crate::model::project::{Project, ProjectId, ProjectUpdate};
use crate::model::validation::ensure_not_blank;
use crate::repo::codec::{
    enum_column, optional_text, query_all, query_optional, timestamp_column, timestamp_to_db,
    Assignments,
};
use crate::repo::{RepoResult, SqliteStore};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    start_date,
    end_date,
    status
FROM projects";

/// Repository interface for project records.
pub trait ProjectRepository {
    /// Inserts `project`, stores the assigned id on it and returns that id.
    fn create_project(&self, project: &mut Project) -> RepoResult<ProjectId>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Lists all projects in insertion order.
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    /// Writes the set fields of `changes`; an empty update is a no-op.
    fn update_project(&self, id: ProjectId, changes: &ProjectUpdate) -> RepoResult<()>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
}

impl ProjectRepository for SqliteStore {
    fn create_project(&self, project: &mut Project) -> RepoResult<ProjectId> {
        project.validate()?;

        let id = self.with_connection("create_project", |conn| {
            conn.execute(
                "INSERT INTO projects (
                    name,
                    description,
                    start_date,
                    end_date,
                    status
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    project.name.as_str(),
                    project.description.as_deref(),
                    timestamp_to_db(project.start_date),
                    timestamp_to_db(project.end_date),
                    project.status.as_str(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        project.id = Some(id);
        Ok(id)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.with_connection("get_project", |conn| {
            query_optional(
                conn,
                &format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_project_row,
            )
        })
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.with_connection("list_projects", |conn| {
            query_all(
                conn,
                &format!("{PROJECT_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_project_row,
            )
        })
    }

    fn update_project(&self, id: ProjectId, changes: &ProjectUpdate) -> RepoResult<()> {
        let mut assignments = Assignments::default();
        if let Some(name) = &changes.name {
            ensure_not_blank("name", name)?;
            assignments.set("name", Value::Text(name.clone()));
        }
        if let Some(description) = &changes.description {
            assignments.set("description", optional_text(description.as_deref()));
        }
        if let Some(start_date) = changes.start_date {
            assignments.set("start_date", Value::Text(timestamp_to_db(start_date)));
        }
        if let Some(end_date) = changes.end_date {
            assignments.set("end_date", Value::Text(timestamp_to_db(end_date)));
        }
        if let Some(status) = changes.status {
            assignments.set("status", Value::Text(status.as_str().to_string()));
        }
        if assignments.is_empty() {
            return Ok(());
        }

        let changed = self.with_connection("update_project", move |conn| {
            assignments.execute(conn, "projects", id)
        })?;
        debug!("event=project_update module=repo status=ok project_id={id} changed={changed}");
        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self.with_connection("delete_project", |conn| {
            Ok(conn.execute("DELETE FROM projects WHERE id = ?1;", [id])?)
        })?;
        debug!("event=project_delete module=repo status=ok project_id={id} changed={changed}");
        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    Ok(Project {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        description: row.get("description")?,
        start_date: timestamp_column(row, "start_date")?,
        end_date: timestamp_column(row, "end_date")?,
        status: enum_column(row, "status")?,
    })
}
