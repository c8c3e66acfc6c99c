//! First-run seed data sources.
//!
//! # Responsibility
//! - Define the remote collaborator the board asks for initial tasks.
//! - Decode seed payloads leniently into `TaskRecord`s.
//!
//! # Invariants
//! - A seed payload must be a JSON array; elements that fail to decode are
//!   skipped, never fatal.
//! - Seed failures are returned as `SeedError`; the board decides how to
//!   degrade.

use crate::model::task::TaskRecord;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod http;

pub use http::{HttpSeedSource, DEFAULT_SEED_URL};

pub type SeedResult<T> = Result<T, SeedError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// Server answered with a non-success status code.
    Status(u16),
    /// Connection, DNS, TLS or timeout failure.
    Transport(String),
    /// Body is not a JSON array.
    InvalidPayload(String),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "seed endpoint returned status {code}"),
            Self::Transport(message) => write!(f, "seed request failed: {message}"),
            Self::InvalidPayload(message) => write!(f, "invalid seed payload: {message}"),
        }
    }
}

impl Error for SeedError {}

/// Provider of initial tasks for an empty board.
pub trait SeedSource {
    fn fetch_seed(&self) -> SeedResult<Vec<TaskRecord>>;
}

/// Seed source that never yields tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSeedSource;

impl SeedSource for NoSeedSource {
    fn fetch_seed(&self) -> SeedResult<Vec<TaskRecord>> {
        Ok(Vec::new())
    }
}

/// Seed source backed by a fixed in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticSeedSource {
    records: Vec<TaskRecord>,
}

impl StaticSeedSource {
    pub fn new(records: Vec<TaskRecord>) -> Self {
        Self { records }
    }

    /// Builds the list from a JSON payload using the same rules as remote
    /// seeds.
    pub fn from_json(payload: serde_json::Value) -> SeedResult<Self> {
        Ok(Self::new(parse_seed_payload(payload)?))
    }
}

impl SeedSource for StaticSeedSource {
    fn fetch_seed(&self) -> SeedResult<Vec<TaskRecord>> {
        Ok(self.records.clone())
    }
}

/// Decodes a seed payload, skipping elements that are not task-shaped.
pub fn parse_seed_payload(payload: serde_json::Value) -> SeedResult<Vec<TaskRecord>> {
    let serde_json::Value::Array(items) = payload else {
        return Err(SeedError::InvalidPayload("expected a json array".to_string()));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<TaskRecord>(item) {
            Ok(record) => records.push(record),
            Err(err) => warn!(
                "event=seed_decode module=seed status=skipped index={} error={}",
                index, err
            ),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::{parse_seed_payload, SeedError};
    use crate::model::task::Priority;
    use serde_json::json;

    #[test]
    fn parse_skips_non_object_elements() {
        let records = parse_seed_payload(json!([
            { "id": 1, "title": "one", "status": "todo", "priority": "High" },
            "garbage",
            { "id": 2, "title": "two", "status": "done" }
        ]))
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("1"));
        assert_eq!(records[0].priority, Priority::High);
        assert_eq!(records[1].priority, Priority::Medium);
    }

    #[test]
    fn parse_rejects_non_array_payload() {
        let err = parse_seed_payload(json!({ "tasks": [] })).unwrap_err();
        assert!(matches!(err, SeedError::InvalidPayload(_)));
    }
}
