use crate::models::{HabitId, HabitRow, HabitView, UserId};
use crate::store::{RowStore, StoreResult};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Ids of the habits `user_id` has a completion record for on `today`.
pub async fn completed_today(
    store: &dyn RowStore,
    user_id: UserId,
    today: NaiveDate,
) -> StoreResult<HashSet<HabitId>> {
    let completions = store.completions_on(user_id, today).await?;
    Ok(completions.into_iter().map(|c| c.habit_id).collect())
}

pub fn annotate(habits: Vec<HabitRow>, completed: &HashSet<HabitId>) -> Vec<HabitView> {
    habits
        .into_iter()
        .map(|habit| {
            let done = completed.contains(&habit.id);
            HabitView::from_row(habit, done)
        })
        .collect()
}
