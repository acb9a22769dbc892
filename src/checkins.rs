use crate::errors::HabitError;
use crate::models::{MoodRow, NewMood, NewMoodRequest, UserId};
use crate::store::{RowStore, StoreResult};
use tracing::info;

pub const RECENT_MOODS: usize = 3;
pub const DEFAULT_ENERGY: u8 = 3;
pub const DEFAULT_SLEEP_HOURS: f32 = 8.0;
pub const MAX_SLEEP_HOURS: f32 = 12.0;

/// Validates a check-in and fills in the slider defaults.
pub fn validate(user_id: UserId, request: NewMoodRequest) -> Result<NewMood, HabitError> {
    let mood_score = request.mood_score.ok_or(HabitError::MoodRequired)?;
    if !(1..=5).contains(&mood_score) {
        return Err(HabitError::MoodRequired);
    }

    let energy_level = request.energy_level.unwrap_or(DEFAULT_ENERGY);
    if !(1..=5).contains(&energy_level) {
        return Err(HabitError::OutOfRange {
            field: "energy_level",
            min: 1.0,
            max: 5.0,
        });
    }

    let sleep_hours = request.sleep_hours.unwrap_or(DEFAULT_SLEEP_HOURS);
    if !(0.0..=MAX_SLEEP_HOURS).contains(&sleep_hours) {
        return Err(HabitError::OutOfRange {
            field: "sleep_hours",
            min: 0.0,
            max: MAX_SLEEP_HOURS,
        });
    }

    let notes = request
        .notes
        .map(|notes| notes.trim().to_string())
        .filter(|notes| !notes.is_empty());

    Ok(NewMood {
        user_id,
        mood_score,
        energy_level,
        sleep_hours,
        notes,
    })
}

pub async fn check_in(
    store: &dyn RowStore,
    user_id: UserId,
    request: NewMoodRequest,
) -> Result<MoodRow, HabitError> {
    let mood = validate(user_id, request)?;
    let row = store.insert_mood(mood).await?;
    info!(%user_id, mood = row.mood_score, "mood check-in saved");
    Ok(row)
}

pub async fn recent(store: &dyn RowStore, user_id: UserId) -> StoreResult<Vec<MoodRow>> {
    store.recent_moods(user_id, RECENT_MOODS).await
}
