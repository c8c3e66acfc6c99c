//! Persistence adapter for the board's task sequence.
//!
//! # Responsibility
//! - Define the storage contract the board depends on.
//! - Keep SQLite slot details out of the board service.

pub mod task_storage;
