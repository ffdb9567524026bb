//! Core domain and persistence logic for the taskdesk task tracker.
//! This crate is the single source of truth for business invariants; the
//! desktop UI only collects input, renders results and surfaces errors.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{LogConfig, StoreConfig, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LogInitError};
pub use model::project::{Project, ProjectId, ProjectStatus, ProjectUpdate};
pub use model::task::{Task, TaskId, TaskPriority, TaskStatus, TaskUpdate};
pub use model::user::{User, UserId, UserRole, UserUpdate};
pub use model::ValidationError;
pub use repo::project_repo::ProjectRepository;
pub use repo::task_repo::TaskRepository;
pub use repo::user_repo::UserRepository;
pub use repo::{EntityKind, RepoError, RepoResult, SqliteStore};
pub use service::project_service::ProjectService;
pub use service::task_service::{NewTask, TaskService};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
