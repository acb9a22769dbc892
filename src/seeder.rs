use crate::models::{NewHabit, UserId};
use crate::store::{RowStore, StoreResult};
use std::collections::HashSet;
use tracing::info;

pub struct DefaultHabit {
    pub name: &'static str,
    pub category: &'static str,
    pub icon: &'static str,
    pub frequency: &'static str,
}

pub static DEFAULT_HABITS: [DefaultHabit; 5] = [
    DefaultHabit {
        name: "Morning Meditation",
        category: "Mindfulness",
        icon: "🧘",
        frequency: "Daily",
    },
    DefaultHabit {
        name: "Exercise",
        category: "Health",
        icon: "🏃",
        frequency: "Daily",
    },
    DefaultHabit {
        name: "Journaling",
        category: "Reflection",
        icon: "📝",
        frequency: "Daily",
    },
    DefaultHabit {
        name: "Read",
        category: "Learning",
        icon: "📚",
        frequency: "Daily",
    },
    DefaultHabit {
        name: "Hydrate",
        category: "Health",
        icon: "💧",
        frequency: "Daily",
    },
];

pub fn default_for(name: &str) -> Option<&'static DefaultHabit> {
    DEFAULT_HABITS.iter().find(|habit| habit.name == name)
}

/// Inserts whichever default habits `user_id` does not have yet, matched by name.
///
/// Only name, category and owner are written so the insert works against
/// schemas without the optional columns. Two concurrent calls for a new user
/// can both insert the same default; nothing here prevents that.
pub async fn ensure_defaults(store: &dyn RowStore, user_id: UserId) -> StoreResult<usize> {
    let existing: HashSet<String> = store.habit_names(user_id).await?.into_iter().collect();

    let missing: Vec<NewHabit> = DEFAULT_HABITS
        .iter()
        .filter(|habit| !existing.contains(habit.name))
        .map(|habit| NewHabit {
            user_id,
            name: habit.name.to_string(),
            category: habit.category.to_string(),
        })
        .collect();

    if missing.is_empty() {
        return Ok(0);
    }

    let inserted = missing.len();
    store.insert_habits(missing).await?;
    info!(%user_id, inserted, "seeded default habits");
    Ok(inserted)
}
