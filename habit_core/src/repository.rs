//! CRUD operations over habits and their check-ins.
//!
//! The repository borrows an explicitly constructed store; each call is one
//! unit of work against it.

use crate::{
    CheckIn, CheckInFields, Habit, HabitFields, HabitId, ListQuery, Result, Store,
};

pub struct HabitRepository<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> HabitRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Persist a new habit with an empty check-in history
    pub fn create_habit(&self, fields: HabitFields) -> Result<Habit> {
        fields.validate()?;
        let habit = self.store.write(|db| db.insert_habit(fields))?;
        tracing::info!("Created habit {} ({:?})", habit.id, habit.name);
        Ok(habit)
    }

    /// Habits in store order, windowed by `skip` and `limit`
    pub fn list_habits(&self, query: ListQuery) -> Result<Vec<Habit>> {
        self.store.read(|db| {
            Ok(db
                .habits()
                .skip(query.skip)
                .take(query.limit)
                .cloned()
                .collect())
        })
    }

    pub fn get_habit(&self, id: HabitId) -> Result<Habit> {
        self.store.read(|db| db.require_habit(id).cloned())
    }

    /// Replace all base fields of a habit; its check-ins are untouched
    pub fn update_habit(&self, id: HabitId, fields: HabitFields) -> Result<Habit> {
        fields.validate()?;
        let habit = self.store.write(|db| db.replace_habit(id, fields))?;
        tracing::info!("Updated habit {}", id);
        Ok(habit)
    }

    /// Delete a habit and every check-in it owns
    pub fn delete_habit(&self, id: HabitId) -> Result<()> {
        let removed = self.store.write(|db| db.remove_habit(id))?;
        tracing::info!(
            "Deleted habit {} and {} check-ins",
            id,
            removed.check_ins.len()
        );
        Ok(())
    }

    /// Record a check-in under an existing habit
    ///
    /// Multiple check-ins on the same date are accepted.
    pub fn create_check_in(&self, habit_id: HabitId, fields: CheckInFields) -> Result<CheckIn> {
        let check_in = self
            .store
            .write(|db| db.insert_check_in(habit_id, fields))?;
        tracing::debug!(
            "Checked in habit {} on {} (check-in {})",
            habit_id,
            check_in.date,
            check_in.id
        );
        Ok(check_in)
    }
}
