//! The persisted habit document.
//!
//! A `Database` holds every habit keyed by id. Each habit owns its
//! check-ins, so removing a habit removes them with it and a check-in can
//! only ever be inserted under a habit that exists. Ids are assigned here
//! from monotonically increasing counters and are never reused.

use crate::{CheckIn, CheckInFields, CheckInId, Error, Habit, HabitFields, HabitId, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Database {
    #[serde(default = "first_id")]
    next_habit_id: HabitId,

    #[serde(default = "first_id")]
    next_check_in_id: CheckInId,

    #[serde(default)]
    habits: BTreeMap<HabitId, Habit>,
}

fn first_id() -> u64 {
    1
}

/// Advance an id counter, refusing to wrap
fn next_id(current: u64, kind: &str) -> Result<u64> {
    current
        .checked_add(1)
        .ok_or_else(|| Error::Integrity(format!("{} id space exhausted at {}", kind, current)))
}

impl Default for Database {
    fn default() -> Self {
        Self {
            next_habit_id: first_id(),
            next_check_in_id: first_id(),
            habits: BTreeMap::new(),
        }
    }
}

impl Database {
    pub fn habit_count(&self) -> usize {
        self.habits.len()
    }

    /// Habits in id order
    pub fn habits(&self) -> impl Iterator<Item = &Habit> {
        self.habits.values()
    }

    pub fn habit(&self, id: HabitId) -> Option<&Habit> {
        self.habits.get(&id)
    }

    /// Look up a habit, failing with `NotFound` when absent
    pub fn require_habit(&self, id: HabitId) -> Result<&Habit> {
        self.habit(id).ok_or_else(|| Error::habit_not_found(id))
    }

    fn require_habit_mut(&mut self, id: HabitId) -> Result<&mut Habit> {
        self.habits
            .get_mut(&id)
            .ok_or_else(|| Error::habit_not_found(id))
    }

    /// Find a check-in by id across all habits
    pub fn check_in(&self, id: CheckInId) -> Option<&CheckIn> {
        self.habits
            .values()
            .flat_map(|h| h.check_ins.iter())
            .find(|c| c.id == id)
    }

    /// Insert a new habit with no check-ins
    pub fn insert_habit(&mut self, fields: HabitFields) -> Result<Habit> {
        let id = self.next_habit_id;
        self.next_habit_id = next_id(id, "habit")?;

        let habit = Habit {
            id,
            name: fields.name,
            frequency: fields.frequency,
            category: fields.category,
            start_date: fields.start_date,
            check_ins: Vec::new(),
        };
        self.habits.insert(id, habit.clone());
        Ok(habit)
    }

    /// Replace the base fields of an existing habit, leaving its check-ins alone
    pub fn replace_habit(&mut self, id: HabitId, fields: HabitFields) -> Result<Habit> {
        let habit = self.require_habit_mut(id)?;
        habit.name = fields.name;
        habit.frequency = fields.frequency;
        habit.category = fields.category;
        habit.start_date = fields.start_date;
        Ok(habit.clone())
    }

    /// Remove a habit together with every check-in it owns
    pub fn remove_habit(&mut self, id: HabitId) -> Result<Habit> {
        self.habits
            .remove(&id)
            .ok_or_else(|| Error::habit_not_found(id))
    }

    /// Append a check-in to an existing habit
    pub fn insert_check_in(&mut self, habit_id: HabitId, fields: CheckInFields) -> Result<CheckIn> {
        let id = self.next_check_in_id;
        let next = next_id(id, "check-in")?;
        let habit = self.require_habit_mut(habit_id)?;

        let check_in = CheckIn {
            id,
            date: fields.date,
            notes: fields.notes,
            habit_id,
        };
        habit.check_ins.push(check_in.clone());
        self.next_check_in_id = next;
        Ok(check_in)
    }

    /// Validate the invariants a loaded document must satisfy
    ///
    /// Returns a list of human-readable violations; empty means consistent.
    pub fn check_integrity(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen_check_ins = HashSet::new();

        for (key, habit) in &self.habits {
            if *key != habit.id {
                errors.push(format!(
                    "Habit key {} doesn't match habit.id {}",
                    key, habit.id
                ));
            }
            if habit.id >= self.next_habit_id {
                errors.push(format!(
                    "Habit id {} is not below next_habit_id {}",
                    habit.id, self.next_habit_id
                ));
            }

            for check_in in &habit.check_ins {
                if check_in.habit_id != habit.id {
                    errors.push(format!(
                        "Check-in {} references habit {} but is owned by habit {}",
                        check_in.id, check_in.habit_id, habit.id
                    ));
                }
                if check_in.id >= self.next_check_in_id {
                    errors.push(format!(
                        "Check-in id {} is not below next_check_in_id {}",
                        check_in.id, self.next_check_in_id
                    ));
                }
                if !seen_check_ins.insert(check_in.id) {
                    errors.push(format!("Duplicate check-in id {}", check_in.id));
                }
            }
        }

        errors
    }
}
