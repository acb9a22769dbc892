use crate::models::HabitRow;
use crate::store::RowStore;
use chrono::NaiveDate;
use tracing::error;

/// Completion records consulted when deciding whether a run continues.
pub const STREAK_LOOKBACK: usize = 30;

/// Streak value for `habit` after it was toggled on `today`.
///
/// Marking done continues the run when yesterday has a completion record and
/// starts a new run of 1 otherwise. Un-marking resets to 0. A failed lookup
/// is logged and yields 0 so the toggle itself is never blocked.
pub async fn compute_new_streak(
    store: &dyn RowStore,
    habit: &HabitRow,
    completed: bool,
    today: NaiveDate,
) -> u32 {
    if !completed {
        return 0;
    }

    let recent = match store.recent_completion_dates(habit.id, STREAK_LOOKBACK).await {
        Ok(dates) => dates,
        Err(err) => {
            error!(habit_id = %habit.id, "failed to load recent completions: {err}");
            return 0;
        }
    };

    next_streak(habit.streak.unwrap_or(0), &recent, today)
}

pub fn next_streak(previous: u32, recent: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some(yesterday) = today.pred_opt() else {
        return 1;
    };
    if recent.contains(&yesterday) {
        previous.saturating_add(1)
    } else {
        1
    }
}
