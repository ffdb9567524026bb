//! Domain services consumed by the desktop UI.
//!
//! # Responsibility
//! - Orchestrate repository calls into per-entity use-case APIs.
//! - Enforce existence checks and two-step status updates
//!   (entity validates, service persists the validated value).
//! - Provide cross-entity queries (overdue tasks, project progress,
//!   tasks of a user).
//!
//! # Invariants
//! - Services never format user-facing messages.
//! - Repository errors propagate unchanged.

pub mod project_service;
pub mod task_service;
pub mod user_service;
