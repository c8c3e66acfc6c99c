use kanban_core::db::{open_db, open_db_in_memory};
use kanban_core::repo::task_storage::{read_slot, write_slot};
use kanban_core::{NewTask, Priority, SqliteTaskStorage, Task, TaskStatus, TaskStorage};

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::from_new(
            "task-1".to_string(),
            NewTask::new("Write tests")
                .with_description("storage layer")
                .with_priority(Priority::parse("HIGH")),
        ),
        Task::from_new(
            "task-2".to_string(),
            NewTask::new("Ship").with_status(TaskStatus::Done),
        ),
        Task::from_new(
            "task-3".to_string(),
            NewTask::new("Someday")
                .with_status(TaskStatus::parse("icebox"))
                .with_priority(Priority::parse("Whenever")),
        ),
    ]
}

#[test]
fn save_then_load_roundtrips_with_lowercase_priorities() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteTaskStorage::new(&conn);
    let tasks = sample_tasks();

    storage.save(&tasks);
    let loaded = storage.load();

    assert_eq!(loaded, tasks);
    let raw = read_slot(&conn, storage.key()).unwrap().unwrap();
    assert!(raw.contains(r#""priority":"high""#));
    assert!(raw.contains(r#""priority":"whenever""#));
    assert!(raw.contains(r#""status":"icebox""#));
}

#[test]
fn load_of_absent_slot_is_empty() {
    let conn = open_db_in_memory().unwrap();
    assert!(SqliteTaskStorage::new(&conn).load().is_empty());
}

#[test]
fn load_accepts_uppercase_priorities_written_elsewhere() {
    let conn = open_db_in_memory().unwrap();
    write_slot(
        &conn,
        "kanban-tasks-jsl",
        r#"[{"id":"a","title":"t","description":"","status":"todo","priority":"MEDIUM"}]"#,
    )
    .unwrap();

    let loaded = SqliteTaskStorage::new(&conn).load();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].priority, Priority::Medium);
}

#[test]
fn unparsable_slot_is_cleared_and_loads_empty() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteTaskStorage::new(&conn);
    write_slot(&conn, storage.key(), "{not json").unwrap();

    assert!(storage.load().is_empty());
    assert_eq!(read_slot(&conn, storage.key()).unwrap(), None);
}

#[test]
fn non_array_slot_is_cleared_and_loads_empty() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteTaskStorage::new(&conn);
    write_slot(&conn, storage.key(), r#"{"tasks":[]}"#).unwrap();

    assert!(storage.load().is_empty());
    assert_eq!(read_slot(&conn, storage.key()).unwrap(), None);
}

#[test]
fn malformed_element_is_skipped_and_the_rest_of_the_slot_survives() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteTaskStorage::new(&conn);
    let raw = r#"[{"id":"a","title":"Keep me","description":"","status":"todo","priority":"high"},{"id":"b","title":"x","description":null,"status":"todo"}]"#;
    write_slot(&conn, storage.key(), raw).unwrap();

    let loaded = storage.load();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "a");
    assert_eq!(loaded[0].priority, Priority::High);
    assert_eq!(read_slot(&conn, storage.key()).unwrap().as_deref(), Some(raw));
}

#[test]
fn save_failure_is_swallowed_and_load_degrades_to_empty() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteTaskStorage::new(&conn);
    storage.save(&sample_tasks());
    conn.execute_batch("DROP TABLE kv_slots;").unwrap();

    storage.save(&sample_tasks());

    assert!(storage.try_save(&sample_tasks()).is_err());
    assert!(storage.load().is_empty());
}

#[test]
fn slots_are_isolated_by_key() {
    let conn = open_db_in_memory().unwrap();
    let work = SqliteTaskStorage::with_key(&conn, "work");
    let home = SqliteTaskStorage::with_key(&conn, "home");

    work.save(&sample_tasks());

    assert_eq!(work.load().len(), 3);
    assert!(home.load().is_empty());
}

#[test]
fn saved_tasks_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");

    {
        let conn = open_db(&path).unwrap();
        SqliteTaskStorage::new(&conn).save(&sample_tasks());
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(SqliteTaskStorage::new(&conn).load(), sample_tasks());
}

#[test]
fn later_save_replaces_the_whole_sequence() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteTaskStorage::new(&conn);

    storage.save(&sample_tasks());
    storage.save(&sample_tasks()[..1]);

    let loaded = storage.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "task-1");
}
