use crate::board::ensure_defaults_and_fetch;
use crate::models::{
    CompletionRow, DailyPoint, HabitBoard, StatsResponse, UserId, WeeklyAveragePoint, WeeklyPoint,
};
use crate::store::{RowStore, StoreResult};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

const WEEK_COUNT: usize = 8;

pub async fn build_stats(
    store: &dyn RowStore,
    user_id: UserId,
    today: NaiveDate,
) -> StoreResult<StatsResponse> {
    let board = ensure_defaults_and_fetch(store, user_id, today).await?;
    let from = window_start(today);
    let completions = store.completions_between(user_id, from, today).await?;
    Ok(build_stats_at(today, &board, &completions))
}

pub fn build_stats_at(
    today: NaiveDate,
    board: &HabitBoard,
    completions: &[CompletionRow],
) -> StatsResponse {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for completion in completions {
        *per_day.entry(completion.completed_date).or_default() += 1;
    }
    let count_on = |date: NaiveDate| per_day.get(&date).copied().unwrap_or(0);
    let active_habits = board.habits.len();

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let completed = count_on(date);
        let rate = if active_habits == 0 {
            0.0
        } else {
            completed as f64 / active_habits as f64
        };
        last_7_days.push(DailyPoint {
            date: date.to_string(),
            completed,
            rate,
        });
    }

    let current_week_start = week_start(today);
    let mut weekly_totals = Vec::with_capacity(WEEK_COUNT);
    let mut weekly_averages = Vec::with_capacity(WEEK_COUNT);

    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let completed: u64 = (0..7)
            .map(|day_offset| count_on(start + Duration::days(day_offset)))
            .sum();

        let days_counted = if today < start {
            0
        } else if today > end {
            7
        } else {
            (today - start).num_days() as u8 + 1
        };
        let denom = if days_counted == 0 { 1.0 } else { f64::from(days_counted) };

        weekly_totals.push(WeeklyPoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            completed,
        });

        weekly_averages.push(WeeklyAveragePoint {
            week: week_label(start),
            days_counted,
            avg_completed: completed as f64 / denom,
        });
    }

    StatsResponse {
        active_habits,
        completed_today: board.completed_count as u64,
        total_streak: board.total_streak,
        last_7_days,
        weekly_totals,
        weekly_averages,
    }
}

/// First day covered by the weekly series ending in `today`'s week.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    week_start(today) - Duration::weeks(WEEK_COUNT as i64 - 1)
}

pub(crate) fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCompletion;
    use crate::storage::{LocalStore, Schema};
    use uuid::Uuid;

    fn empty_board(today: NaiveDate) -> HabitBoard {
        HabitBoard {
            date: today,
            streaks_enabled: true,
            completed_count: 0,
            total_streak: 0,
            habits: Vec::new(),
            notice: None,
        }
    }

    fn completion(on: NaiveDate) -> CompletionRow {
        CompletionRow {
            id: Uuid::new_v4(),
            habit_id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            completed_date: on,
        }
    }

    #[test]
    fn series_lengths_and_labels() {
        // 2026-01-05 is a Monday.
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let stats = build_stats_at(today, &empty_board(today), &[]);

        assert_eq!(stats.last_7_days.len(), 7);
        assert_eq!(stats.weekly_totals.len(), 8);
        assert_eq!(stats.weekly_averages.len(), 8);
        let current = stats.weekly_averages.last().unwrap();
        assert_eq!(current.week, "2026-W02");
        assert_eq!(current.days_counted, 1);
        assert_eq!(stats.last_7_days[6].rate, 0.0);
    }

    #[test]
    fn completions_are_grouped_by_day_and_week() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let last_week = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
        let completions = vec![
            completion(today),
            completion(today),
            completion(monday),
            completion(last_week),
        ];

        let stats = build_stats_at(today, &empty_board(today), &completions);
        let today_point = stats.last_7_days.last().unwrap();
        assert_eq!(today_point.date, "2026-01-07");
        assert_eq!(today_point.completed, 2);

        let current = stats.weekly_totals.last().unwrap();
        assert_eq!(current.start_date, "2026-01-05");
        assert_eq!(current.completed, 3);
        assert_eq!(stats.weekly_totals[6].completed, 1);

        let average = stats.weekly_averages.last().unwrap();
        assert_eq!(average.days_counted, 3);
        assert!((average.avg_completed - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn rates_use_the_active_habit_count() {
        let store = LocalStore::in_memory(Schema::default());
        let user = Uuid::new_v4();
        let today = NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();
        let board = ensure_defaults_and_fetch(&store, user, today).await.unwrap();
        for habit in board.habits.iter().take(2) {
            store
                .insert_completion(NewCompletion {
                    habit_id: habit.id,
                    user_id: user,
                    completed_date: today,
                })
                .await
                .unwrap();
        }

        let stats = build_stats(&store, user, today).await.unwrap();
        assert_eq!(stats.active_habits, 5);
        assert_eq!(stats.completed_today, 2);
        let point = stats.last_7_days.last().unwrap();
        assert!((point.rate - 0.4).abs() < 1e-9);
    }
}
