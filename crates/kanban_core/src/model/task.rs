//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record stored in the board sequence.
//! - Normalize status/priority values read from persisted or remote JSON.
//!
//! # Invariants
//! - `id` is immutable once assigned and unique within one board.
//! - `priority` is always lowercase on the wire; absent/empty input is
//!   `Priority::Medium`.
//! - Unknown `status` values are preserved verbatim, never rewritten.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque task identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = String;

/// Board column a task belongs to.
///
/// Matching is exact: `"Todo"` is not `"todo"`. Values outside the three
/// columns stay in the sequence but never reach a column view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
    /// Raw value carried through persistence unchanged.
    Unrecognized(String),
}

impl TaskStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "todo" => Self::Todo,
            "doing" => Self::Doing,
            "done" => Self::Done,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub fn is_column(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<TaskStatus> for String {
    fn from(value: TaskStatus) -> Self {
        value.as_str().to_string()
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Urgency used only for in-column ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    /// Lowercased raw value; sorts after every known priority.
    Unrecognized(String),
}

impl Priority {
    /// Case-insensitive parse. Empty input falls back to `Medium`.
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "" | "medium" => Self::Medium,
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Unrecognized(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Sort weight: high 3, medium 2, low 1, anything else 0.
    pub fn weight(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::Unrecognized(_) => 0,
        }
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.as_str().to_string()
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Priority::parse).unwrap_or_default())
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Canonical task record held by the board and persisted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "deserialize_task_id")]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    /// Builds a task from form input and a freshly generated id.
    pub fn from_new(id: TaskId, input: NewTask) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
        }
    }

    /// Shallow merge: fields present in `patch` overwrite, others stay.
    /// The id is never touched.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

/// Create payload produced by the UI form (no id yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
}

impl NewTask {
    /// Todo-column task with empty description and default priority.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title)
    }
}

/// Partial update payload. `None` means "keep the existing value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        match self.title.as_deref() {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

/// Lenient task shape used for remote seed payloads.
///
/// Every field is optional; `normalize` decides what survives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "deserialize_optional_task_id")]
    pub id: Option<TaskId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Priority,
}

impl TaskRecord {
    /// Converts into a canonical task, generating an id when absent.
    ///
    /// Returns `None` when the record has no usable title.
    pub fn normalize(self, next_id: impl FnOnce() -> TaskId) -> Option<Task> {
        let title = self.title.filter(|title| !title.trim().is_empty())?;
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(next_id);

        Some(Task {
            id,
            title,
            description: self.description.unwrap_or_default(),
            status: self
                .status
                .unwrap_or_else(|| TaskStatus::Unrecognized(String::new())),
            priority: self.priority,
        })
    }
}

/// Validation error for task input payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTaskId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawTaskId> for TaskId {
    fn from(value: RawTaskId) -> Self {
        match value {
            RawTaskId::Text(text) => text,
            RawTaskId::Number(number) => number.to_string(),
        }
    }
}

fn deserialize_task_id<'de, D>(deserializer: D) -> Result<TaskId, D::Error>
where
    D: Deserializer<'de>,
{
    RawTaskId::deserialize(deserializer).map(TaskId::from)
}

fn deserialize_optional_task_id<'de, D>(deserializer: D) -> Result<Option<TaskId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawTaskId>::deserialize(deserializer)?.map(TaskId::from))
}

#[cfg(test)]
mod tests {
    use super::{NewTask, Priority, Task, TaskPatch, TaskRecord, TaskStatus, TaskValidationError};
    use serde_json::json;

    #[test]
    fn priority_parse_is_case_insensitive_and_defaults_to_medium() {
        assert_eq!(Priority::parse("HIGH"), Priority::High);
        assert_eq!(Priority::parse(" Low "), Priority::Low);
        assert_eq!(Priority::parse(""), Priority::Medium);
        assert_eq!(
            Priority::parse("Urgent"),
            Priority::Unrecognized("urgent".to_string())
        );
    }

    #[test]
    fn priority_weights_follow_fixed_order() {
        assert_eq!(Priority::High.weight(), 3);
        assert_eq!(Priority::Medium.weight(), 2);
        assert_eq!(Priority::Low.weight(), 1);
        assert_eq!(Priority::parse("someday").weight(), 0);
    }

    #[test]
    fn task_deserializes_numeric_id_and_missing_priority() {
        let task: Task = serde_json::from_value(json!({
            "id": 7,
            "title": "Ship it",
            "status": "doing"
        }))
        .unwrap();

        assert_eq!(task.id, "7");
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Doing);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn null_priority_becomes_medium_and_serializes_lowercase() {
        let task: Task = serde_json::from_value(json!({
            "id": "a",
            "title": "t",
            "status": "todo",
            "priority": null
        }))
        .unwrap();
        assert_eq!(task.priority, Priority::Medium);

        let loud: Task = serde_json::from_value(json!({
            "id": "b",
            "title": "t",
            "status": "todo",
            "priority": "HIGH"
        }))
        .unwrap();
        assert_eq!(serde_json::to_value(&loud).unwrap()["priority"], "high");
    }

    #[test]
    fn unrecognized_status_survives_serialization() {
        let task: Task = serde_json::from_value(json!({
            "id": "x",
            "title": "Parked",
            "status": "blocked"
        }))
        .unwrap();

        assert_eq!(task.status, TaskStatus::Unrecognized("blocked".to_string()));
        assert!(!task.status.is_column());
        assert_eq!(serde_json::to_value(&task).unwrap()["status"], "blocked");
    }

    #[test]
    fn apply_is_a_shallow_merge() {
        let mut task = Task::from_new(
            "id-1".to_string(),
            NewTask::new("Write docs").with_description("README"),
        );

        task.apply(TaskPatch::status(TaskStatus::Done));

        assert_eq!(task.id, "id-1");
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.description, "README");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn validation_rejects_blank_titles() {
        assert_eq!(
            NewTask::new("   ").validate(),
            Err(TaskValidationError::EmptyTitle)
        );
        let patch = TaskPatch {
            title: Some(String::new()),
            ..TaskPatch::default()
        };
        assert_eq!(patch.validate(), Err(TaskValidationError::EmptyTitle));
        assert!(TaskPatch::default().validate().is_ok());
    }

    #[test]
    fn record_normalize_fills_gaps_and_skips_untitled() {
        let record: TaskRecord = serde_json::from_value(json!({
            "title": "Seeded",
            "priority": "Low"
        }))
        .unwrap();
        let task = record.normalize(|| "gen-1".to_string()).unwrap();
        assert_eq!(task.id, "gen-1");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.status, TaskStatus::Unrecognized(String::new()));

        let untitled: TaskRecord = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert!(untitled.normalize(|| "unused".to_string()).is_none());
    }
}
