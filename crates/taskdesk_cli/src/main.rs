//! CLI probe for the taskdesk core.
//!
//! # Responsibility
//! - Open a store the way the desktop shell does and print a short summary.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `taskdesk [DB_PATH]`. The path falls back to `TASKDESK_DB`, then to
//! `tasks.db` in the working directory. Logging starts when
//! `TASKDESK_LOG_DIR` names an absolute directory.

use log::info;
use std::process::ExitCode;
use taskdesk_core::{
    default_log_level, init_logging, LogConfig, ProjectService, SqliteStore, StoreConfig,
    TaskService, UserService, DEFAULT_DB_FILE_NAME,
};

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("TASKDESK_LOG_DIR") {
        if let Err(err) = init_logging(&LogConfig::new(default_log_level(), log_dir)) {
            eprintln!("logging disabled: {err}");
        }
    }

    let db_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TASKDESK_DB").ok())
        .unwrap_or_else(|| DEFAULT_DB_FILE_NAME.to_string());

    match run(StoreConfig::new(&db_path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskdesk: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("taskdesk_core version={}", taskdesk_core::core_version());
    println!("database={}", config.db_path.display());

    let store = SqliteStore::open(config)?;
    let users = UserService::new(store.clone());
    let projects = ProjectService::new(store.clone());
    let tasks = TaskService::new(store);

    let user_count = users.get_all_users()?.len();
    let all_projects = projects.get_all_projects()?;
    let task_count = tasks.get_all_tasks()?.len();
    let overdue = tasks.overdue_tasks()?;

    println!(
        "users={user_count} projects={} tasks={task_count} overdue={}",
        all_projects.len(),
        overdue.len()
    );
    for project in &all_projects {
        println!(
            "project id={} status={} progress={:.2}",
            project.id.unwrap_or_default(),
            project.status,
            project.progress()
        );
    }
    for task in &overdue {
        println!(
            "overdue task id={} due={} assignee_id={}",
            task.id.unwrap_or_default(),
            task.due_date,
            task.assignee_id
        );
    }

    info!(
        "event=cli_summary module=cli status=ok users={user_count} projects={} tasks={task_count} overdue={}",
        all_projects.len(),
        overdue.len()
    );
    Ok(())
}
