//! Domain entities for users, projects and tasks.
//!
//! # Responsibility
//! - Define the records shared by storage, services and the desktop UI.
//! - Own enum validation and derived values (project progress, task overdue).
//!
//! # Invariants
//! - Entities reference each other by id only; nothing is embedded by value.
//! - Status mutations validate in memory and never write through to storage.

pub mod project;
pub mod task;
pub mod user;
pub(crate) mod validation;

pub use validation::ValidationError;
