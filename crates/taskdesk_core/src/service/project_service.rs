//! Project use-case service.
//!
//! # Invariants
//! - Status changes go through `Project::update_status` before persistence.
//! - Only the `status` column is written by `update_project_status`.

use crate::model::project::{Project, ProjectId, ProjectStatus, ProjectUpdate};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::{EntityKind, RepoError, RepoResult};
use chrono::{NaiveDateTime, Utc};
use log::info;

/// Use-case service for project records.
pub struct ProjectService<S> {
    store: S,
}

impl<S: ProjectRepository> ProjectService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an active project and returns the persisted record.
    pub fn add_project(
        &self,
        name: impl Into<String>,
        description: Option<String>,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> RepoResult<Project> {
        let mut project = Project::new(name, description, start_date, end_date);
        let id = self.store.create_project(&mut project)?;
        info!("event=project_add module=service status=ok project_id={id}");
        Ok(project)
    }

    pub fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.store.get_project(id)
    }

    pub fn get_all_projects(&self) -> RepoResult<Vec<Project>> {
        self.store.list_projects()
    }

    pub fn update_project(&self, id: ProjectId, changes: &ProjectUpdate) -> RepoResult<()> {
        self.store.update_project(id, changes)
    }

    /// Deletes the project and, through cascade, all of its tasks.
    pub fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        self.store.delete_project(id)?;
        info!("event=project_delete module=service status=ok project_id={id}");
        Ok(())
    }

    /// Validates and persists a new status for an existing project.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no project has `id`.
    /// - `RepoError::Validation` when `new_status` is not a known status;
    ///   the stored status is left unchanged.
    pub fn update_project_status(
        &self,
        id: ProjectId,
        new_status: &str,
    ) -> RepoResult<ProjectStatus> {
        let mut project = self.require_project(id)?;
        let status = project.update_status(new_status)?;

        let changes = ProjectUpdate {
            status: Some(status),
            ..ProjectUpdate::default()
        };
        self.store.update_project(id, &changes)?;
        info!("event=project_status module=service status=ok project_id={id} new_status={status}");
        Ok(status)
    }

    /// Progress of an existing project at the current UTC time.
    pub fn project_progress(&self, id: ProjectId) -> RepoResult<f64> {
        self.project_progress_at(id, Utc::now().naive_utc())
    }

    /// Progress of an existing project evaluated at `now`.
    pub fn project_progress_at(&self, id: ProjectId, now: NaiveDateTime) -> RepoResult<f64> {
        Ok(self.require_project(id)?.progress_at(now))
    }

    fn require_project(&self, id: ProjectId) -> RepoResult<Project> {
        self.store.get_project(id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::Project,
            id,
        })
    }
}
