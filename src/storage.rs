use crate::models::{
    CompletionRow, HabitId, HabitRow, MoodRow, NewCompletion, NewHabit, NewMood, NewReflection,
    ReflectionRow, UserId,
};
use crate::store::{RowStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct Tables {
    #[serde(default)]
    habits: Vec<HabitRow>,
    #[serde(default)]
    habit_completions: Vec<CompletionRow>,
    #[serde(default)]
    moods: Vec<MoodRow>,
    #[serde(default)]
    reflections: Vec<ReflectionRow>,
}

/// Optional columns of the `habits` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub streak_column: bool,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            streak_column: true,
        }
    }
}

/// Table store kept in memory and written back to a JSON file on every mutation.
pub struct LocalStore {
    path: Option<PathBuf>,
    schema: Schema,
    tables: Mutex<Tables>,
}

impl LocalStore {
    pub async fn open(path: PathBuf, schema: Schema) -> Self {
        let mut tables = load_tables(&path).await;
        if !schema.streak_column {
            for habit in &mut tables.habits {
                habit.streak = None;
            }
        }
        info!(
            habits = tables.habits.len(),
            completions = tables.habit_completions.len(),
            "opened table store at {}",
            path.display()
        );
        Self {
            path: Some(path),
            schema,
            tables: Mutex::new(tables),
        }
    }

    pub fn in_memory(schema: Schema) -> Self {
        Self {
            path: None,
            schema,
            tables: Mutex::new(Tables::default()),
        }
    }

    /// Writes `next` to disk and only then makes it the live copy.
    async fn commit(&self, tables: &mut Tables, next: Tables) -> StoreResult<()> {
        if let Some(path) = &self.path {
            persist_tables(path, &next).await?;
        }
        *tables = next;
        Ok(())
    }
}

async fn load_tables(path: &Path) -> Tables {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(tables) => tables,
            Err(err) => {
                error!("failed to parse data file: {err}");
                Tables::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Tables::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Tables::default()
        }
    }
}

async fn persist_tables(path: &Path, tables: &Tables) -> StoreResult<()> {
    let payload = serde_json::to_vec_pretty(tables)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[async_trait]
impl RowStore for LocalStore {
    async fn habit_names(&self, user_id: UserId) -> StoreResult<Vec<String>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .habits
            .iter()
            .filter(|habit| habit.user_id == user_id)
            .map(|habit| habit.name.clone())
            .collect())
    }

    async fn habits_for_user(&self, user_id: UserId) -> StoreResult<Vec<HabitRow>> {
        let tables = self.tables.lock().await;
        let mut habits: Vec<HabitRow> = tables
            .habits
            .iter()
            .filter(|habit| habit.user_id == user_id)
            .cloned()
            .collect();
        habits.sort_by_key(|habit| habit.created_at);
        Ok(habits)
    }

    async fn find_habit_by_name(
        &self,
        user_id: UserId,
        name: &str,
    ) -> StoreResult<Option<HabitRow>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .habits
            .iter()
            .find(|habit| habit.user_id == user_id && habit.name == name)
            .cloned())
    }

    async fn insert_habits(&self, rows: Vec<NewHabit>) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        let mut next = tables.clone();
        let streak = self.schema.streak_column.then_some(0);
        for row in rows {
            next.habits.push(HabitRow {
                id: Uuid::new_v4(),
                user_id: row.user_id,
                name: row.name,
                category: row.category,
                icon: None,
                frequency: None,
                streak,
                created_at: Utc::now(),
            });
        }
        self.commit(&mut tables, next).await
    }

    async fn update_streak(&self, habit_id: HabitId, streak: u32) -> StoreResult<()> {
        if !self.schema.streak_column {
            return Err(StoreError::UnknownColumn {
                table: "habits",
                column: "streak",
            });
        }
        let mut tables = self.tables.lock().await;
        let mut next = tables.clone();
        for habit in next.habits.iter_mut().filter(|habit| habit.id == habit_id) {
            habit.streak = Some(streak);
        }
        self.commit(&mut tables, next).await
    }

    async fn delete_habit(&self, user_id: UserId, habit_id: HabitId) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        let owned = |habit: &HabitRow| habit.id == habit_id && habit.user_id == user_id;
        if !tables.habits.iter().any(owned) {
            return Ok(false);
        }
        let mut next = tables.clone();
        next.habits.retain(|habit| !owned(habit));
        next.habit_completions
            .retain(|completion| completion.habit_id != habit_id);
        self.commit(&mut tables, next).await?;
        Ok(true)
    }

    async fn completions_on(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> StoreResult<Vec<CompletionRow>> {
        self.completions_between(user_id, date, date).await
    }

    async fn completions_between(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<CompletionRow>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .habit_completions
            .iter()
            .filter(|c| c.user_id == user_id && c.completed_date >= from && c.completed_date <= to)
            .cloned()
            .collect())
    }

    async fn recent_completion_dates(
        &self,
        habit_id: HabitId,
        limit: usize,
    ) -> StoreResult<Vec<NaiveDate>> {
        let tables = self.tables.lock().await;
        let mut dates: Vec<NaiveDate> = tables
            .habit_completions
            .iter()
            .filter(|c| c.habit_id == habit_id)
            .map(|c| c.completed_date)
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.truncate(limit);
        Ok(dates)
    }

    async fn insert_completion(&self, row: NewCompletion) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        let mut next = tables.clone();
        next.habit_completions.push(CompletionRow {
            id: Uuid::new_v4(),
            habit_id: row.habit_id,
            user_id: row.user_id,
            completed_date: row.completed_date,
        });
        self.commit(&mut tables, next).await
    }

    async fn delete_completions(&self, habit_id: HabitId, date: NaiveDate) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        let mut next = tables.clone();
        next.habit_completions
            .retain(|c| !(c.habit_id == habit_id && c.completed_date == date));
        self.commit(&mut tables, next).await
    }

    async fn insert_mood(&self, row: NewMood) -> StoreResult<MoodRow> {
        let mut tables = self.tables.lock().await;
        let mood = MoodRow {
            id: Uuid::new_v4(),
            user_id: row.user_id,
            mood_score: row.mood_score,
            energy_level: row.energy_level,
            sleep_hours: row.sleep_hours,
            notes: row.notes,
            created_at: Utc::now(),
        };
        let mut next = tables.clone();
        next.moods.push(mood.clone());
        self.commit(&mut tables, next).await?;
        Ok(mood)
    }

    async fn recent_moods(&self, user_id: UserId, limit: usize) -> StoreResult<Vec<MoodRow>> {
        let tables = self.tables.lock().await;
        let mut moods: Vec<MoodRow> = tables
            .moods
            .iter()
            .filter(|mood| mood.user_id == user_id)
            .cloned()
            .collect();
        moods.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        moods.truncate(limit);
        Ok(moods)
    }

    async fn insert_reflection(&self, row: NewReflection) -> StoreResult<ReflectionRow> {
        let mut tables = self.tables.lock().await;
        let reflection = ReflectionRow {
            id: Uuid::new_v4(),
            user_id: row.user_id,
            prompt: row.prompt,
            response: row.response,
            category: row.category,
            week_start: row.week_start,
            created_at: Utc::now(),
        };
        let mut next = tables.clone();
        next.reflections.push(reflection.clone());
        self.commit(&mut tables, next).await?;
        Ok(reflection)
    }

    async fn reflections_for_user(&self, user_id: UserId) -> StoreResult<Vec<ReflectionRow>> {
        let tables = self.tables.lock().await;
        let mut reflections: Vec<ReflectionRow> = tables
            .reflections
            .iter()
            .filter(|reflection| reflection.user_id == user_id)
            .cloned()
            .collect();
        reflections.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reflections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_habit(user_id: UserId, name: &str) -> NewHabit {
        NewHabit {
            user_id,
            name: name.to_string(),
            category: "Health".to_string(),
        }
    }

    fn temp_data_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("habit_tracker_store_{}.json", Uuid::new_v4()));
        path
    }

    #[tokio::test]
    async fn habits_are_scoped_to_owner() {
        let store = LocalStore::in_memory(Schema::default());
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store
            .insert_habits(vec![new_habit(alice, "Read"), new_habit(bob, "Exercise")])
            .await
            .unwrap();

        let names = store.habit_names(alice).await.unwrap();
        assert_eq!(names, vec!["Read".to_string()]);
        assert!(store.find_habit_by_name(bob, "Read").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn recent_dates_are_newest_first_and_limited() {
        let store = LocalStore::in_memory(Schema::default());
        let user = Uuid::new_v4();
        let habit = Uuid::new_v4();
        for day in [3, 1, 2, 5, 4] {
            store
                .insert_completion(NewCompletion {
                    habit_id: habit,
                    user_id: user,
                    completed_date: date(2024, 1, day),
                })
                .await
                .unwrap();
        }

        let dates = store.recent_completion_dates(habit, 3).await.unwrap();
        assert_eq!(dates, vec![date(2024, 1, 5), date(2024, 1, 4), date(2024, 1, 3)]);
    }

    #[tokio::test]
    async fn delete_habit_cascades_to_completions() {
        let store = LocalStore::in_memory(Schema::default());
        let user = Uuid::new_v4();
        store.insert_habits(vec![new_habit(user, "Hydrate")]).await.unwrap();
        let habit = store.habits_for_user(user).await.unwrap().remove(0);
        let today = date(2024, 1, 11);
        store
            .insert_completion(NewCompletion {
                habit_id: habit.id,
                user_id: user,
                completed_date: today,
            })
            .await
            .unwrap();

        assert!(!store.delete_habit(Uuid::new_v4(), habit.id).await.unwrap());
        assert!(store.delete_habit(user, habit.id).await.unwrap());
        assert!(store.habits_for_user(user).await.unwrap().is_empty());
        assert!(store.completions_on(user, today).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn streak_column_can_be_absent() {
        let store = LocalStore::in_memory(Schema {
            streak_column: false,
        });
        let user = Uuid::new_v4();
        store.insert_habits(vec![new_habit(user, "Read")]).await.unwrap();
        let habit = store.habits_for_user(user).await.unwrap().remove(0);

        assert_eq!(habit.streak, None);
        let err = store.update_streak(habit.id, 3).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownColumn { column: "streak", .. }));
    }

    #[tokio::test]
    async fn file_store_reloads_persisted_rows() {
        let path = temp_data_path();
        let user = Uuid::new_v4();
        {
            let store = LocalStore::open(path.clone(), Schema::default()).await;
            store.insert_habits(vec![new_habit(user, "Journaling")]).await.unwrap();
            let habit = store.habits_for_user(user).await.unwrap().remove(0);
            store.update_streak(habit.id, 4).await.unwrap();
        }

        let reopened = LocalStore::open(path.clone(), Schema::default()).await;
        let habits = reopened.habits_for_user(user).await.unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].streak, Some(4));

        let without_streaks = LocalStore::open(path.clone(), Schema { streak_column: false }).await;
        let habits = without_streaks.habits_for_user(user).await.unwrap();
        assert_eq!(habits[0].streak, None);

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn failed_write_leaves_tables_untouched() {
        let mut path = std::env::temp_dir();
        path.push(format!("habit_tracker_missing_{}", Uuid::new_v4()));
        path.push("habits.json");
        let store = LocalStore::open(path, Schema::default()).await;
        let user = Uuid::new_v4();
        let today = date(2024, 1, 11);

        let err = store
            .insert_completion(NewCompletion {
                habit_id: Uuid::new_v4(),
                user_id: user,
                completed_date: today,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(store.completions_on(user, today).await.unwrap().is_empty());

        assert!(store.insert_habits(vec![new_habit(user, "Read")]).await.is_err());
        assert!(store.habits_for_user(user).await.unwrap().is_empty());

        let mood = NewMood {
            user_id: user,
            mood_score: 4,
            energy_level: 3,
            sleep_hours: 8.0,
            notes: None,
        };
        assert!(store.insert_mood(mood).await.is_err());
        assert!(store.recent_moods(user, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn moods_and_reflections_are_newest_first() {
        let store = LocalStore::in_memory(Schema::default());
        let user = Uuid::new_v4();
        for score in 1..=4 {
            store
                .insert_mood(NewMood {
                    user_id: user,
                    mood_score: score,
                    energy_level: 3,
                    sleep_hours: 7.5,
                    notes: None,
                })
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        let scores: Vec<u8> = store
            .recent_moods(user, 3)
            .await
            .unwrap()
            .iter()
            .map(|mood| mood.mood_score)
            .collect();
        assert_eq!(scores, vec![4, 3, 2]);
        assert!(store.recent_moods(Uuid::new_v4(), 3).await.unwrap().is_empty());

        for response in ["first", "second"] {
            store
                .insert_reflection(NewReflection {
                    user_id: user,
                    prompt: "What's your intention for next week?".to_string(),
                    response: response.to_string(),
                    category: "Planning".to_string(),
                    week_start: date(2024, 1, 8),
                })
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        let reflections = store.reflections_for_user(user).await.unwrap();
        assert_eq!(reflections.len(), 2);
        assert_eq!(reflections[0].response, "second");
    }
}
