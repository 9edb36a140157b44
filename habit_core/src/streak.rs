//! Current-streak computation.
//!
//! A streak is the number of consecutive calendar days, ending today or
//! yesterday, with at least one check-in each. The scan walks backwards from
//! its anchor and stops at the first missing day; older history is never
//! examined. Multiple check-ins on one date count once.
//!
//! The habit's `frequency` label is not consulted: a "weekly" habit is still
//! measured in consecutive days.

use crate::{HabitId, HabitSummary, Result, Store, StreakReport};
use chrono::{Local, NaiveDate};
use std::collections::HashSet;

/// Today's date on the server's local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Count consecutive days present in `dates`, anchored at `today`
///
/// If `today` has no entry the anchor moves back one day, so a streak stays
/// current until the day is over.
pub fn streak_ending_at(dates: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let mut cursor = if dates.contains(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut streak = 0;
    while let Some(day) = cursor.filter(|d| dates.contains(d)) {
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

/// Streak analytics over a store
pub struct StreakEngine<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> StreakEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn check_in_dates(&self, habit_id: HabitId) -> Result<HashSet<NaiveDate>> {
        self.store.read(|db| {
            Ok(db
                .require_habit(habit_id)?
                .check_ins
                .iter()
                .map(|c| c.date)
                .collect())
        })
    }

    pub fn current_streak(&self, habit_id: HabitId) -> Result<u32> {
        self.current_streak_on(habit_id, today())
    }

    /// Current streak as of an explicit `today`
    pub fn current_streak_on(&self, habit_id: HabitId, today: NaiveDate) -> Result<u32> {
        let dates = self.check_in_dates(habit_id)?;
        let streak = streak_ending_at(&dates, today);
        tracing::debug!(
            "Habit {} streak on {}: {} ({} distinct days)",
            habit_id,
            today,
            streak,
            dates.len()
        );
        Ok(streak)
    }

    pub fn report(&self, habit_id: HabitId) -> Result<StreakReport> {
        Ok(StreakReport {
            current_streak: self.current_streak(habit_id)?,
        })
    }

    pub fn summary(&self, habit_id: HabitId) -> Result<HabitSummary> {
        self.summary_on(habit_id, today())
    }

    /// Streak, check-in total and today's status, read in one unit of work
    pub fn summary_on(&self, habit_id: HabitId, today: NaiveDate) -> Result<HabitSummary> {
        self.store.read(|db| {
            let habit = db.require_habit(habit_id)?;
            let dates: HashSet<_> = habit.check_ins.iter().map(|c| c.date).collect();

            Ok(HabitSummary {
                habit_id,
                current_streak: streak_ending_at(&dates, today),
                total_check_ins: habit.check_ins.len(),
                checked_in_today: habit.checked_in_on(today),
            })
        })
    }
}
