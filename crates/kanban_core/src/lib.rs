//! Core logic for the kanban task board.
//! This crate owns the task sequence, its persistence and its projection
//! into board columns; front ends only implement `BoardRenderer`.

pub mod config;
pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod view;

pub use config::{BoardConfig, ConfigError};
pub use id::{IdGenerator, SequentialIdGenerator, TimeRandomIdGenerator};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{
    NewTask, Priority, Task, TaskId, TaskPatch, TaskRecord, TaskStatus, TaskValidationError,
};
pub use repo::task_storage::{RepoError, RepoResult, SqliteTaskStorage, TaskStorage};
pub use seed::{
    HttpSeedSource, NoSeedSource, SeedError, SeedResult, SeedSource, StaticSeedSource,
};
pub use service::board_service::{InitSource, TaskBoard};
pub use view::board::{project, BoardRenderer, BoardView, Column, NullRenderer, ViewMode};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
