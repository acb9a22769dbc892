use crate::errors::HabitError;
use crate::models::{NewReflection, NewReflectionRequest, ReflectionRow, ReflectionWeek, UserId};
use crate::stats::week_start;
use crate::store::{RowStore, StoreResult};
use chrono::{Duration, NaiveDate};
use tracing::info;

pub struct Prompt {
    pub id: u8,
    pub question: &'static str,
    pub category: &'static str,
}

pub static PROMPTS: [Prompt; 6] = [
    Prompt {
        id: 1,
        question: "What were the highlights of your week?",
        category: "Positivity",
    },
    Prompt {
        id: 2,
        question: "What challenges did you face and how did you overcome them?",
        category: "Growth",
    },
    Prompt {
        id: 3,
        question: "Which habit made the biggest impact on your wellbeing?",
        category: "Habits",
    },
    Prompt {
        id: 4,
        question: "How has your mood evolved this week?",
        category: "Emotions",
    },
    Prompt {
        id: 5,
        question: "What self-care moments are you most grateful for?",
        category: "Gratitude",
    },
    Prompt {
        id: 6,
        question: "What's your intention for next week?",
        category: "Planning",
    },
];

pub fn prompt(id: u8) -> Option<&'static Prompt> {
    PROMPTS.iter().find(|prompt| prompt.id == id)
}

/// Saves a response to one of the fixed prompts, filed under `today`'s week.
pub async fn reflect(
    store: &dyn RowStore,
    user_id: UserId,
    request: NewReflectionRequest,
    today: NaiveDate,
) -> Result<ReflectionRow, HabitError> {
    let prompt = prompt(request.prompt_id).ok_or(HabitError::UnknownPrompt(request.prompt_id))?;
    let response = request.response.trim();
    if response.is_empty() {
        return Err(HabitError::EmptyReflection);
    }

    let row = store
        .insert_reflection(NewReflection {
            user_id,
            prompt: prompt.question.to_string(),
            response: response.to_string(),
            category: prompt.category.to_string(),
            week_start: week_start(today),
        })
        .await?;
    info!(%user_id, category = prompt.category, "reflection saved");
    Ok(row)
}

pub async fn reflections_by_week(
    store: &dyn RowStore,
    user_id: UserId,
    today: NaiveDate,
) -> StoreResult<Vec<ReflectionWeek>> {
    let reflections = store.reflections_for_user(user_id).await?;
    Ok(group_by_week(reflections, today))
}

/// Groups newest-first reflections by week, newest week first.
pub fn group_by_week(mut reflections: Vec<ReflectionRow>, today: NaiveDate) -> Vec<ReflectionWeek> {
    reflections.sort_by(|a, b| {
        b.week_start
            .cmp(&a.week_start)
            .then(b.created_at.cmp(&a.created_at))
    });

    let mut weeks: Vec<ReflectionWeek> = Vec::new();
    for reflection in reflections {
        match weeks.last_mut() {
            Some(week) if week.week_start == reflection.week_start => {
                week.reflections.push(reflection)
            }
            _ => {
                let start = reflection.week_start;
                weeks.push(ReflectionWeek {
                    week_start: start,
                    week_end: start + Duration::days(6),
                    label: week_label(start, today),
                    reflections: vec![reflection],
                });
            }
        }
    }
    weeks
}

fn week_label(start: NaiveDate, today: NaiveDate) -> String {
    let current = week_start(today);
    if start == current {
        "This week".to_string()
    } else if start == current - Duration::weeks(1) {
        "Last week".to_string()
    } else {
        let end = start + Duration::days(6);
        format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
    }
}
