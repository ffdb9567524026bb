//! Task use-case service.
//!
//! # Invariants
//! - Status changes go through `Task::update_status` before persistence.
//! - Overdue filtering is evaluated in memory on freshly loaded tasks.

use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskId, TaskPriority, TaskStatus, TaskUpdate};
use crate::model::user::UserId;
use crate::repo::task_repo::TaskRepository;
use crate::repo::{EntityKind, RepoError, RepoResult};
use chrono::{NaiveDateTime, Utc};
use log::info;

/// Request model for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date: NaiveDateTime,
    /// Must reference an existing project.
    pub project_id: ProjectId,
    /// Must reference an existing user.
    pub assignee_id: UserId,
}

/// Use-case service for task records.
pub struct TaskService<S> {
    store: S,
}

impl<S: TaskRepository> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a pending task and returns the persisted record.
    ///
    /// # Errors
    /// - `RepoError::Integrity` when the project or assignee does not exist.
    pub fn add_task(&self, request: NewTask) -> RepoResult<Task> {
        let mut task = Task::new(
            request.title,
            request.description,
            request.priority,
            request.due_date,
            request.project_id,
            request.assignee_id,
        );
        let id = self.store.create_task(&mut task)?;
        info!(
            "event=task_add module=service status=ok task_id={id} project_id={} assignee_id={}",
            task.project_id, task.assignee_id
        );
        Ok(task)
    }

    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.store.get_task(id)
    }

    pub fn get_all_tasks(&self) -> RepoResult<Vec<Task>> {
        self.store.list_tasks()
    }

    pub fn update_task(&self, id: TaskId, changes: &TaskUpdate) -> RepoResult<()> {
        self.store.update_task(id, changes)
    }

    pub fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.store.delete_task(id)?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }

    pub fn search_tasks(&self, needle: &str) -> RepoResult<Vec<Task>> {
        self.store.search_tasks(needle)
    }

    /// Validates and persists a new status for an existing task.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no task has `id`.
    /// - `RepoError::Validation` when `new_status` is not a known status;
    ///   the stored status is left unchanged.
    pub fn update_task_status(&self, id: TaskId, new_status: &str) -> RepoResult<TaskStatus> {
        let mut task = self.store.get_task(id)?.ok_or(RepoError::NotFound {
            entity: EntityKind::Task,
            id,
        })?;
        let status = task.update_status(new_status)?;

        let changes = TaskUpdate {
            status: Some(status),
            ..TaskUpdate::default()
        };
        self.store.update_task(id, &changes)?;
        info!("event=task_status module=service status=ok task_id={id} new_status={status}");
        Ok(status)
    }

    /// Unfinished tasks whose due date has passed.
    pub fn overdue_tasks(&self) -> RepoResult<Vec<Task>> {
        self.overdue_tasks_at(Utc::now().naive_utc())
    }

    /// Unfinished tasks whose due date is before `now`.
    pub fn overdue_tasks_at(&self, now: NaiveDateTime) -> RepoResult<Vec<Task>> {
        Ok(self
            .store
            .list_tasks()?
            .into_iter()
            .filter(|task| task.is_overdue_at(now))
            .collect())
    }

    pub fn tasks_by_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        self.store.tasks_by_project(project_id)
    }

    pub fn tasks_by_user(&self, assignee_id: UserId) -> RepoResult<Vec<Task>> {
        self.store.tasks_by_assignee(assignee_id)
    }
}
