#![forbid(unsafe_code)]

//! Core domain model and business logic for Habit Hero.
//!
//! This crate provides:
//! - Domain types (habits, check-ins, analytics payloads)
//! - The persisted habit document and its integrity rules
//! - Store implementations (locked JSON file, in-memory)
//! - The habit repository and streak engine
//! - CSV export, configuration and logging

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod db;
pub mod store;
pub mod repository;
pub mod streak;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use db::Database;
pub use store::{FileStore, MemoryStore, Store};
pub use repository::HabitRepository;
pub use streak::{streak_ending_at, today, StreakEngine};
pub use export::export_check_ins;
