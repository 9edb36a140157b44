//! Core domain types for the Habit Hero system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Habits and the check-ins they own
//! - Field sets for creating and replacing records
//! - Listing parameters
//! - Analytics and acknowledgement payloads
//!
//! Field names serialize exactly as they appear here; dates serialize as
//! ISO-8601 calendar dates (`YYYY-MM-DD`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned habit identifier
pub type HabitId = u64;

/// Store-assigned check-in identifier
pub type CheckInId = u64;

/// Default page size for habit listings
pub const DEFAULT_LIST_LIMIT: usize = 100;

// ============================================================================
// Records
// ============================================================================

/// A record that the habit was performed on a given date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckIn {
    pub id: CheckInId,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub habit_id: HabitId,
}

/// A tracked recurring activity
///
/// `frequency` and `category` are free-text labels. A habit exclusively owns
/// its check-ins, kept in insertion order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub frequency: String,
    pub category: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub check_ins: Vec<CheckIn>,
}

impl Habit {
    /// Whether any check-in falls on `date`
    pub fn checked_in_on(&self, date: NaiveDate) -> bool {
        self.check_ins.iter().any(|c| c.date == date)
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// The base fields of a habit, used for both creation and full replacement
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitFields {
    pub name: String,
    pub frequency: String,
    pub category: String,
    pub start_date: NaiveDate,
}

impl HabitFields {
    pub fn new(
        name: impl Into<String>,
        frequency: impl Into<String>,
        category: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            frequency: frequency.into(),
            category: category.into(),
            start_date,
        }
    }

    /// Check required-field presence
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::Error::MissingField("name"));
        }
        Ok(())
    }
}

/// Fields for a new check-in; the owning habit comes from the caller
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckInFields {
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckInFields {
    pub fn new(date: NaiveDate, notes: Option<String>) -> Self {
        Self { date, notes }
    }
}

/// Offset/limit window for habit listings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub skip: usize,
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

// ============================================================================
// Outputs
// ============================================================================

/// Response payload for the current-streak query
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakReport {
    pub current_streak: u32,
}

/// Per-habit analytics shown alongside a habit's detail view
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitSummary {
    pub habit_id: HabitId,
    pub current_streak: u32,
    pub total_check_ins: usize,
    pub checked_in_today: bool,
}

/// Plain acknowledgement message
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub message: String,
}
