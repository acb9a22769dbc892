use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;
pub type HabitId = Uuid;

pub const DEFAULT_ICON: &str = "⭐";
pub const DEFAULT_FREQUENCY: &str = "Daily";

/// A row of the `habits` table.
///
/// `streak` is `None` when the backing store does not carry the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitRow {
    pub id: HabitId,
    pub user_id: UserId,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `habits`. Only the columns every schema has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub user_id: UserId,
    pub name: String,
    pub category: String,
}

/// A row of the `habit_completions` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRow {
    pub id: Uuid,
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub completed_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompletion {
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub completed_date: NaiveDate,
}

/// A habit as rendered for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitView {
    pub id: HabitId,
    pub name: String,
    pub category: String,
    pub icon: String,
    pub frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
}

impl HabitView {
    /// Rows without icon or frequency fall back to the matching default habit,
    /// then to [`DEFAULT_ICON`] and [`DEFAULT_FREQUENCY`].
    pub fn from_row(row: HabitRow, completed: bool) -> Self {
        let preset = crate::seeder::default_for(&row.name);
        let icon = row
            .icon
            .or_else(|| preset.map(|habit| habit.icon.to_string()))
            .unwrap_or_else(|| DEFAULT_ICON.to_string());
        let frequency = row
            .frequency
            .or_else(|| preset.map(|habit| habit.frequency.to_string()))
            .unwrap_or_else(|| DEFAULT_FREQUENCY.to_string());
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            icon,
            frequency,
            streak: row.streak,
            created_at: row.created_at,
            completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitBoard {
    pub date: NaiveDate,
    pub streaks_enabled: bool,
    pub completed_count: usize,
    pub total_streak: u64,
    pub habits: Vec<HabitView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "Other".to_string()
}

/// A row of the `moods` table: one daily check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRow {
    pub id: Uuid,
    pub user_id: UserId,
    pub mood_score: u8,
    pub energy_level: u8,
    pub sleep_hours: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMood {
    pub user_id: UserId,
    pub mood_score: u8,
    pub energy_level: u8,
    pub sleep_hours: f32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMoodRequest {
    pub mood_score: Option<u8>,
    pub energy_level: Option<u8>,
    pub sleep_hours: Option<f32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A row of the `reflections` table. `week_start` is the Monday of the week written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionRow {
    pub id: Uuid,
    pub user_id: UserId,
    pub prompt: String,
    pub response: String,
    pub category: String,
    pub week_start: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReflection {
    pub user_id: UserId,
    pub prompt: String,
    pub response: String,
    pub category: String,
    pub week_start: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReflectionRequest {
    pub prompt_id: u8,
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReflectionWeek {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub label: String,
    pub reflections: Vec<ReflectionRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub completed: u64,
    pub rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub completed: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyAveragePoint {
    pub week: String,
    pub days_counted: u8,
    pub avg_completed: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub active_habits: usize,
    pub completed_today: u64,
    pub total_streak: u64,
    pub last_7_days: Vec<DailyPoint>,
    pub weekly_totals: Vec<WeeklyPoint>,
    pub weekly_averages: Vec<WeeklyAveragePoint>,
}
