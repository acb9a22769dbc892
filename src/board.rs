use crate::models::{HabitBoard, HabitId, HabitRow, UserId};
use crate::resolver::{annotate, completed_today};
use crate::seeder::ensure_defaults;
use crate::store::{RowStore, StoreResult};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::error;

/// Whether the store carries a streak value, judged from the first row.
pub fn supports_streaks(habits: &[HabitRow]) -> bool {
    habits.first().is_some_and(|habit| habit.streak.is_some())
}

/// Seeds the default habits, then loads the user's habits annotated for `today`.
///
/// A failed seed is logged and reported in the board's notice; the fetch goes
/// ahead with whatever exists.
pub async fn ensure_defaults_and_fetch(
    store: &dyn RowStore,
    user_id: UserId,
    today: NaiveDate,
) -> StoreResult<HabitBoard> {
    let notice = match ensure_defaults(store, user_id).await {
        Ok(_) => None,
        Err(err) => {
            error!(%user_id, "failed to ensure default habits: {err}");
            Some(format!("Error ensuring default habits: {err}"))
        }
    };

    let habits = store.habits_for_user(user_id).await?;
    let completed = completed_today(store, user_id, today).await?;
    Ok(HabitBoard {
        notice,
        ..assemble(today, habits, &completed)
    })
}

pub fn assemble(today: NaiveDate, habits: Vec<HabitRow>, completed: &HashSet<HabitId>) -> HabitBoard {
    let streaks_enabled = supports_streaks(&habits);
    let habits = annotate(habits, completed);
    let completed_count = habits.iter().filter(|habit| habit.completed).count();
    let total_streak = habits
        .iter()
        .map(|habit| u64::from(habit.streak.unwrap_or(0)))
        .sum();

    HabitBoard {
        date: today,
        streaks_enabled,
        completed_count,
        total_streak,
        habits,
        notice: None,
    }
}
