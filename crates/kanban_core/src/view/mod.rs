//! Presentation-facing projection of the board.
//!
//! # Responsibility
//! - Turn the task sequence into display columns without touching any
//!   concrete UI toolkit.
//! - Define the renderer capability concrete front ends implement.

pub mod board;
