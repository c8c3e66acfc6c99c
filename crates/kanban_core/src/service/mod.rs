//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate storage, seeding and rendering into board operations.
//! - Keep front ends decoupled from storage details.

pub mod board_service;
