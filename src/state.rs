use crate::models::HabitId;
use crate::store::RowStore;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RowStore>,
    saving: Arc<Mutex<HashSet<HabitId>>>,
}

impl AppState {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self {
            store,
            saving: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Marks `habit_id` as saving. `None` while another change to it is in flight.
    pub fn begin_saving(&self, habit_id: HabitId) -> Option<SavingGuard> {
        let mut saving = self.saving.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !saving.insert(habit_id) {
            return None;
        }
        Some(SavingGuard {
            habit_id,
            saving: Arc::clone(&self.saving),
        })
    }
}

pub struct SavingGuard {
    habit_id: HabitId,
    saving: Arc<Mutex<HashSet<HabitId>>>,
}

impl Drop for SavingGuard {
    fn drop(&mut self) {
        let mut saving = self.saving.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        saving.remove(&self.habit_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LocalStore, Schema};
    use uuid::Uuid;

    #[test]
    fn one_change_per_habit_at_a_time() {
        let state = AppState::new(Arc::new(LocalStore::in_memory(Schema::default())));
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let guard = state.begin_saving(first).expect("first toggle starts");
        assert!(state.begin_saving(first).is_none());
        assert!(state.begin_saving(second).is_some());

        drop(guard);
        assert!(state.begin_saving(first).is_some());
    }
}
