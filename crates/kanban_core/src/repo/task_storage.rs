//! Task sequence persistence over a durable key-value slot.
//!
//! # Responsibility
//! - Read/write one named slot holding the whole task sequence as JSON.
//! - Recover from corrupt slots by clearing them.
//! - Skip individual elements that do not decode as tasks, keeping the rest.
//!
//! # Invariants
//! - The sequence is always written wholesale, never incrementally.
//! - `TaskStorage` never surfaces an error to the caller; failures are
//!   logged and the in-memory sequence stays authoritative.
//! - Concurrent writers to the same slot are last-writer-wins.

use crate::db::DbError;
use crate::model::task::Task;
use log::{debug, error, info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used when the caller does not configure one.
pub const DEFAULT_STORAGE_KEY: &str = "kanban-tasks-jsl";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for slot access and task sequence decoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Slot content exists but is not a task array.
    CorruptSlot(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode task sequence: {err}"),
            Self::CorruptSlot(message) => write!(f, "corrupt task slot: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::CorruptSlot(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract used by the board.
pub trait TaskStorage {
    /// Returns the saved sequence, or an empty one when nothing usable is
    /// stored.
    fn load(&self) -> Vec<Task>;
    /// Replaces the saved sequence. Failures are logged, not returned.
    fn save(&self, tasks: &[Task]);
}

/// Reads the raw slot value, `None` when the key was never written.
pub fn read_slot(conn: &Connection, key: &str) -> RepoResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM kv_slots WHERE key = ?1;",
            [key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

/// Writes the raw slot value, replacing any previous content.
pub fn write_slot(conn: &Connection, key: &str, value: &str) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO kv_slots (key, value, updated_at)
         VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at;",
        params![key, value],
    )?;
    Ok(())
}

/// Removes the slot. Clearing an absent slot is not an error.
pub fn clear_slot(conn: &Connection, key: &str) -> RepoResult<()> {
    conn.execute("DELETE FROM kv_slots WHERE key = ?1;", [key])?;
    Ok(())
}

/// Decodes a slot payload into a task sequence.
///
/// Elements that do not decode as a task are skipped with a warning; the
/// remaining tasks keep their order.
///
/// # Errors
/// - `RepoError::CorruptSlot` when the payload is not JSON or not an array.
pub fn decode_tasks(raw: &str) -> RepoResult<Vec<Task>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|err| RepoError::CorruptSlot(format!("invalid json: {err}")))?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(RepoError::CorruptSlot(format!(
                "expected array, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut tasks = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Task>(item) {
            Ok(task) => tasks.push(task),
            Err(err) => warn!(
                "event=storage_decode module=repo status=skipped index={} error={}",
                index, err
            ),
        }
    }
    Ok(tasks)
}

/// Encodes a task sequence into its slot payload.
pub fn encode_tasks(tasks: &[Task]) -> RepoResult<String> {
    serde_json::to_string(tasks).map_err(RepoError::Serialize)
}

/// SQLite-backed task storage bound to one slot key.
pub struct SqliteTaskStorage<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteTaskStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fallible variant of `save` for callers that need the outcome.
    pub fn try_save(&self, tasks: &[Task]) -> RepoResult<()> {
        let payload = encode_tasks(tasks)?;
        write_slot(self.conn, &self.key, &payload)
    }
}

impl TaskStorage for SqliteTaskStorage<'_> {
    fn load(&self) -> Vec<Task> {
        let raw = match read_slot(self.conn, &self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(
                    "event=storage_load module=repo status=empty key={}",
                    self.key
                );
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=storage_load module=repo status=error key={} error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        match decode_tasks(&raw) {
            Ok(tasks) => {
                info!(
                    "event=storage_load module=repo status=ok key={} count={}",
                    self.key,
                    tasks.len()
                );
                tasks
            }
            Err(err) => {
                warn!(
                    "event=storage_load module=repo status=corrupt key={} error={}",
                    self.key, err
                );
                if let Err(clear_err) = clear_slot(self.conn, &self.key) {
                    error!(
                        "event=storage_clear module=repo status=error key={} error={}",
                        self.key, clear_err
                    );
                }
                Vec::new()
            }
        }
    }

    fn save(&self, tasks: &[Task]) {
        match self.try_save(tasks) {
            Ok(()) => debug!(
                "event=storage_save module=repo status=ok key={} count={}",
                self.key,
                tasks.len()
            ),
            Err(err) => error!(
                "event=storage_save module=repo status=error key={} count={} error={}",
                self.key,
                tasks.len(),
                err
            ),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_tasks, RepoError};

    #[test]
    fn decode_rejects_non_array_payloads() {
        let err = decode_tasks(r#"{"id":"a"}"#).unwrap_err();
        assert!(matches!(err, RepoError::CorruptSlot(ref msg) if msg.contains("object")));

        let err = decode_tasks("not json").unwrap_err();
        assert!(matches!(err, RepoError::CorruptSlot(ref msg) if msg.contains("invalid json")));
    }

    #[test]
    fn decode_skips_elements_that_are_not_tasks() {
        let tasks = decode_tasks(
            r#"[{"id":"a","title":"kept","status":"todo"},{"title":"no id"},3,{"id":"b","title":"also kept","status":"done"}]"#,
        )
        .unwrap();

        let ids: Vec<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn decode_accepts_empty_array() {
        assert!(decode_tasks("[]").unwrap().is_empty());
    }
}
