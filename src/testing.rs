//! Store double that delegates to a [`LocalStore`] and fails selected calls.

use crate::models::{
    CompletionRow, HabitId, HabitRow, MoodRow, NewCompletion, NewHabit, NewMood, NewReflection,
    ReflectionRow, UserId,
};
use crate::storage::LocalStore;
use crate::store::{RowStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct FailingStore {
    inner: LocalStore,
    recent_dates: AtomicBool,
    streak_writes: AtomicBool,
    habit_inserts: AtomicBool,
}

impl FailingStore {
    pub fn new(inner: LocalStore) -> Self {
        Self {
            inner,
            recent_dates: AtomicBool::new(false),
            streak_writes: AtomicBool::new(false),
            habit_inserts: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &LocalStore {
        &self.inner
    }

    pub fn fail_recent_dates(&self) {
        self.recent_dates.store(true, Ordering::SeqCst);
    }

    pub fn fail_streak_writes(&self) {
        self.streak_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_habit_inserts(&self) {
        self.habit_inserts.store(true, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> StoreResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("injected failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl RowStore for FailingStore {
    async fn habit_names(&self, user_id: UserId) -> StoreResult<Vec<String>> {
        self.inner.habit_names(user_id).await
    }

    async fn habits_for_user(&self, user_id: UserId) -> StoreResult<Vec<HabitRow>> {
        self.inner.habits_for_user(user_id).await
    }

    async fn find_habit_by_name(
        &self,
        user_id: UserId,
        name: &str,
    ) -> StoreResult<Option<HabitRow>> {
        self.inner.find_habit_by_name(user_id, name).await
    }

    async fn insert_habits(&self, rows: Vec<NewHabit>) -> StoreResult<()> {
        Self::check(&self.habit_inserts)?;
        self.inner.insert_habits(rows).await
    }

    async fn update_streak(&self, habit_id: HabitId, streak: u32) -> StoreResult<()> {
        Self::check(&self.streak_writes)?;
        self.inner.update_streak(habit_id, streak).await
    }

    async fn delete_habit(&self, user_id: UserId, habit_id: HabitId) -> StoreResult<bool> {
        self.inner.delete_habit(user_id, habit_id).await
    }

    async fn completions_on(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> StoreResult<Vec<CompletionRow>> {
        self.inner.completions_on(user_id, date).await
    }

    async fn completions_between(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<CompletionRow>> {
        self.inner.completions_between(user_id, from, to).await
    }

    async fn recent_completion_dates(
        &self,
        habit_id: HabitId,
        limit: usize,
    ) -> StoreResult<Vec<NaiveDate>> {
        Self::check(&self.recent_dates)?;
        self.inner.recent_completion_dates(habit_id, limit).await
    }

    async fn insert_completion(&self, row: NewCompletion) -> StoreResult<()> {
        self.inner.insert_completion(row).await
    }

    async fn delete_completions(&self, habit_id: HabitId, date: NaiveDate) -> StoreResult<()> {
        self.inner.delete_completions(habit_id, date).await
    }

    async fn insert_mood(&self, row: NewMood) -> StoreResult<MoodRow> {
        self.inner.insert_mood(row).await
    }

    async fn recent_moods(&self, user_id: UserId, limit: usize) -> StoreResult<Vec<MoodRow>> {
        self.inner.recent_moods(user_id, limit).await
    }

    async fn insert_reflection(&self, row: NewReflection) -> StoreResult<ReflectionRow> {
        self.inner.insert_reflection(row).await
    }

    async fn reflections_for_user(&self, user_id: UserId) -> StoreResult<Vec<ReflectionRow>> {
        self.inner.reflections_for_user(user_id).await
    }
}
