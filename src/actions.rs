use crate::board::supports_streaks;
use crate::errors::HabitError;
use crate::models::{HabitId, NewCompletion, NewHabit, NewHabitRequest, UserId};
use crate::resolver::completed_today;
use crate::store::RowStore;
use crate::streak::compute_new_streak;
use chrono::NaiveDate;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub completed: bool,
    pub streak: u32,
    pub streak_written: bool,
}

/// Flips today's completion of a habit and recomputes its streak.
///
/// The completion record is written before the streak. If the streak write
/// fails the completion stays and the error is returned; the streak is then
/// stale until the next successful toggle.
pub async fn toggle(
    store: &dyn RowStore,
    user_id: UserId,
    habit_id: HabitId,
    today: NaiveDate,
) -> Result<ToggleOutcome, HabitError> {
    let habits = store.habits_for_user(user_id).await?;
    let streaks_enabled = supports_streaks(&habits);
    let habit = habits
        .into_iter()
        .find(|habit| habit.id == habit_id)
        .ok_or(HabitError::NotFound(habit_id))?;

    let completed = !completed_today(store, user_id, today)
        .await?
        .contains(&habit_id);

    if completed {
        store
            .insert_completion(NewCompletion {
                habit_id,
                user_id,
                completed_date: today,
            })
            .await?;
    } else {
        store.delete_completions(habit_id, today).await?;
    }

    let streak = compute_new_streak(store, &habit, completed, today).await;
    if streaks_enabled {
        store.update_streak(habit_id, streak).await?;
    } else {
        debug!(%habit_id, "skipping streak update; column missing");
    }

    info!(%habit_id, completed, streak, %today, "toggled habit");
    Ok(ToggleOutcome {
        completed,
        streak,
        streak_written: streaks_enabled,
    })
}

pub async fn add_habit(
    store: &dyn RowStore,
    user_id: UserId,
    request: NewHabitRequest,
) -> Result<(), HabitError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(HabitError::EmptyName);
    }

    if store.find_habit_by_name(user_id, name).await?.is_some() {
        return Err(HabitError::DuplicateName);
    }

    let category = match request.category.trim() {
        "" => "Other",
        category => category,
    };
    store
        .insert_habits(vec![NewHabit {
            user_id,
            name: name.to_string(),
            category: category.to_string(),
        }])
        .await?;

    info!(%user_id, name, "added habit");
    Ok(())
}

pub async fn delete_habit(
    store: &dyn RowStore,
    user_id: UserId,
    habit_id: HabitId,
) -> Result<(), HabitError> {
    if !store.delete_habit(user_id, habit_id).await? {
        return Err(HabitError::NotFound(habit_id));
    }
    info!(%user_id, %habit_id, "deleted habit");
    Ok(())
}
