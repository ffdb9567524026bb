use chrono::{NaiveDate, NaiveDateTime};
use taskdesk_core::{
    Project, ProjectId, ProjectRepository, RepoError, SqliteStore, StoreConfig, Task, TaskId,
    TaskPriority, TaskRepository, TaskStatus, TaskUpdate, User, UserId, UserRepository, UserRole,
};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    store: SqliteStore,
    project_id: ProjectId,
    user_id: UserId,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(StoreConfig::new(dir.path().join("tasks.db"))).unwrap();

    let mut user = User::new("ann", "ann@example.com", UserRole::Developer);
    let user_id = store.create_user(&mut user).unwrap();
    let mut project = Project::new("site", None, at(2024, 1, 1), at(2024, 3, 1));
    let project_id = store.create_project(&mut project).unwrap();

    Fixture {
        _dir: dir,
        store,
        project_id,
        user_id,
    }
}

fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

impl Fixture {
    fn add(&self, title: &str, description: Option<&str>) -> TaskId {
        let mut task = Task::new(
            title,
            description.map(str::to_string),
            TaskPriority::Medium,
            at(2024, 2, 1),
            self.project_id,
            self.user_id,
        );
        self.store.create_task(&mut task).unwrap()
    }
}

#[test]
fn create_and_get_roundtrip() {
    let fx = fixture();

    let mut task = Task::new(
        "write report",
        Some("quarterly numbers".to_string()),
        TaskPriority::High,
        at(2024, 2, 15),
        fx.project_id,
        fx.user_id,
    );
    task.status = TaskStatus::InProgress;
    let id = fx.store.create_task(&mut task).unwrap();

    assert_eq!(task.id, Some(id));
    assert_eq!(fx.store.get_task(id).unwrap().unwrap(), task);
}

#[test]
fn dangling_project_or_assignee_is_integrity_error() {
    let fx = fixture();

    let mut orphan = Task::new("orphan", None, TaskPriority::Low, at(2024, 2, 1), 999, fx.user_id);
    let err = fx.store.create_task(&mut orphan).unwrap_err();
    assert!(matches!(err, RepoError::Integrity(_)), "unexpected error: {err}");

    let mut unassigned = Task::new("unassigned", None, TaskPriority::Low, at(2024, 2, 1), fx.project_id, 999);
    let err = fx.store.create_task(&mut unassigned).unwrap_err();
    assert!(matches!(err, RepoError::Integrity(_)), "unexpected error: {err}");

    assert!(fx.store.list_tasks().unwrap().is_empty());
}

#[test]
fn update_changes_exactly_one_field() {
    let fx = fixture();
    let id = fx.add("draft", Some("first pass"));
    let before = fx.store.get_task(id).unwrap().unwrap();

    let changes = TaskUpdate {
        priority: Some(TaskPriority::High),
        ..TaskUpdate::default()
    };
    fx.store.update_task(id, &changes).unwrap();

    let after = fx.store.get_task(id).unwrap().unwrap();
    assert_eq!(
        after,
        Task {
            priority: TaskPriority::High,
            ..before
        }
    );
}

#[test]
fn update_serializes_due_date_and_reassigns() {
    let fx = fixture();
    let id = fx.add("draft", None);
    let mut other = User::new("bo", "bo@example.com", UserRole::Manager);
    let other_id = fx.store.create_user(&mut other).unwrap();

    let due = NaiveDate::from_ymd_opt(2024, 5, 20)
        .unwrap()
        .and_hms_opt(17, 45, 0)
        .unwrap();
    let changes = TaskUpdate {
        due_date: Some(due),
        assignee_id: Some(other_id),
        ..TaskUpdate::default()
    };
    fx.store.update_task(id, &changes).unwrap();

    let loaded = fx.store.get_task(id).unwrap().unwrap();
    assert_eq!(loaded.due_date, due);
    assert_eq!(loaded.assignee_id, other_id);
    assert!(fx.store.tasks_by_assignee(fx.user_id).unwrap().is_empty());
}

#[test]
fn update_to_missing_project_is_integrity_error() {
    let fx = fixture();
    let id = fx.add("draft", None);

    let changes = TaskUpdate {
        project_id: Some(404),
        ..TaskUpdate::default()
    };
    let err = fx.store.update_task(id, &changes).unwrap_err();
    assert!(matches!(err, RepoError::Integrity(_)), "unexpected error: {err}");
    assert_eq!(fx.store.get_task(id).unwrap().unwrap().project_id, fx.project_id);
}

#[test]
fn empty_update_is_noop() {
    let fx = fixture();
    let id = fx.add("draft", None);
    let before = fx.store.get_task(id).unwrap();

    fx.store.update_task(id, &TaskUpdate::default()).unwrap();

    assert_eq!(fx.store.get_task(id).unwrap(), before);
}

#[test]
fn search_matches_title_or_description_substring() {
    let fx = fixture();
    let in_title = fx.add("Weekly report", None);
    let in_description = fx.add("numbers", Some("feeds the board reporting"));
    fx.add("unrelated", Some("nothing here"));
    fx.add("also unrelated", None);

    let hits: Vec<_> = fx
        .store
        .search_tasks("report")
        .unwrap()
        .into_iter()
        .filter_map(|task| task.id)
        .collect();
    assert_eq!(hits, vec![in_title, in_description]);
}

#[test]
fn search_ignores_ascii_case() {
    let fx = fixture();
    let id = fx.add("Quarterly REPORT", None);

    let hits = fx.store.search_tasks("report").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, Some(id));
}

#[test]
fn search_treats_wildcards_literally() {
    let fx = fixture();
    let literal = fx.add("reach 100% coverage", None);
    fx.add("reach 1000 users", None);

    let hits = fx.store.search_tasks("100%").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, Some(literal));

    assert!(fx.store.search_tasks("1_0").unwrap().is_empty());
}

#[test]
fn tasks_by_project_filters_on_foreign_key() {
    let fx = fixture();
    let mut other = Project::new("other", None, at(2024, 1, 1), at(2024, 3, 1));
    let other_id = fx.store.create_project(&mut other).unwrap();

    let first = fx.add("first", None);
    let mut elsewhere = Task::new("elsewhere", None, TaskPriority::Low, at(2024, 2, 1), other_id, fx.user_id);
    fx.store.create_task(&mut elsewhere).unwrap();
    let second = fx.add("second", None);

    let ids: Vec<_> = fx
        .store
        .tasks_by_project(fx.project_id)
        .unwrap()
        .into_iter()
        .filter_map(|task| task.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn delete_task_removes_row_and_missing_delete_is_noop() {
    let fx = fixture();
    let id = fx.add("draft", None);

    fx.store.delete_task(id).unwrap();
    fx.store.delete_task(id).unwrap();

    assert!(fx.store.get_task(id).unwrap().is_none());
}
