use crate::models::{
    CompletionRow, HabitId, HabitRow, MoodRow, NewCompletion, NewHabit, NewMood, NewReflection,
    ReflectionRow, UserId,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("column {table}.{column} does not exist")]
    UnknownColumn {
        table: &'static str,
        column: &'static str,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Row-level access to the `habits`, `habit_completions`, `moods` and `reflections` tables.
///
/// Every call is independent: there are no transactions spanning calls.
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn habit_names(&self, user_id: UserId) -> StoreResult<Vec<String>>;

    /// Habits owned by `user_id`, oldest first.
    async fn habits_for_user(&self, user_id: UserId) -> StoreResult<Vec<HabitRow>>;

    async fn find_habit_by_name(&self, user_id: UserId, name: &str)
    -> StoreResult<Option<HabitRow>>;

    async fn insert_habits(&self, rows: Vec<NewHabit>) -> StoreResult<()>;

    async fn update_streak(&self, habit_id: HabitId, streak: u32) -> StoreResult<()>;

    /// Returns `false` when no habit matched. Completions of the habit go with it.
    async fn delete_habit(&self, user_id: UserId, habit_id: HabitId) -> StoreResult<bool>;

    async fn completions_on(&self, user_id: UserId, date: NaiveDate)
    -> StoreResult<Vec<CompletionRow>>;

    /// Completions dated within `from..=to`.
    async fn completions_between(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<CompletionRow>>;

    /// Up to `limit` completion dates for the habit, newest first.
    async fn recent_completion_dates(
        &self,
        habit_id: HabitId,
        limit: usize,
    ) -> StoreResult<Vec<NaiveDate>>;

    async fn insert_completion(&self, row: NewCompletion) -> StoreResult<()>;

    async fn delete_completions(&self, habit_id: HabitId, date: NaiveDate) -> StoreResult<()>;

    async fn insert_mood(&self, row: NewMood) -> StoreResult<MoodRow>;

    /// Up to `limit` check-ins, newest first.
    async fn recent_moods(&self, user_id: UserId, limit: usize) -> StoreResult<Vec<MoodRow>>;

    async fn insert_reflection(&self, row: NewReflection) -> StoreResult<ReflectionRow>;

    /// All of the user's reflections, newest first.
    async fn reflections_for_user(&self, user_id: UserId) -> StoreResult<Vec<ReflectionRow>>;
}
