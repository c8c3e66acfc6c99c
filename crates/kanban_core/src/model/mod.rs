//! Board domain model.
//!
//! # Responsibility
//! - Define the task record, its status/priority vocabularies and the
//!   create/update payloads accepted by the board.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal from the sequence.

pub mod task;
