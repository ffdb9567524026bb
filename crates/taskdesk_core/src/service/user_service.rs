//! User use-case service.

use crate::model::task::Task;
use crate::model::user::{User, UserId, UserRole, UserUpdate};
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::{EntityKind, RepoError, RepoResult};
use log::info;

/// Use-case service for user records.
pub struct UserService<S> {
    store: S,
}

impl<S: UserRepository + TaskRepository> UserService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new user now and returns the persisted record.
    pub fn add_user(
        &self,
        username: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> RepoResult<User> {
        let mut user = User::new(username, email, role);
        let id = self.store.create_user(&mut user)?;
        info!("event=user_add module=service status=ok user_id={id} role={role}");
        Ok(user)
    }

    pub fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.store.get_user(id)
    }

    pub fn get_all_users(&self) -> RepoResult<Vec<User>> {
        self.store.list_users()
    }

    pub fn update_user(&self, id: UserId, changes: &UserUpdate) -> RepoResult<()> {
        self.store.update_user(id, changes)
    }

    /// Deletes the user and, through cascade, every task assigned to them.
    pub fn delete_user(&self, id: UserId) -> RepoResult<()> {
        self.store.delete_user(id)?;
        info!("event=user_delete module=service status=ok user_id={id}");
        Ok(())
    }

    /// Tasks assigned to an existing user.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no user has `id`.
    pub fn user_tasks(&self, id: UserId) -> RepoResult<Vec<Task>> {
        if self.store.get_user(id)?.is_none() {
            return Err(RepoError::NotFound {
                entity: EntityKind::User,
                id,
            });
        }
        self.store.tasks_by_assignee(id)
    }
}
