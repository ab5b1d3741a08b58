//! Shared test utilities for habitcore integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use habitcore::ledger::LedgerSettings;
use habitcore::rules::{default_rule_base, RuleEvaluator};
use habitcore::store::{MemoryStore, ProfileStore, SqliteStore, StoreError};
use habitcore::{Gamification, Habit, HabitId, Profile, UserId};

pub type MemoryEngine = Gamification<Arc<MemoryStore>, Arc<MemoryStore>>;

/// A fixed calendar day, `2025-03-<d>`
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).expect("valid test date")
}

pub fn default_evaluator() -> RuleEvaluator {
    RuleEvaluator::new(default_rule_base().expect("embedded rules parse"))
}

/// A memory store holding an empty profile for each of `users`
pub fn store_with_profiles(users: &[UserId]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for &user in users {
        store.insert_profile(Profile::new(user));
    }
    store
}

pub fn memory_engine(store: &Arc<MemoryStore>, settings: LedgerSettings) -> MemoryEngine {
    Gamification::new(store.clone(), store.clone(), default_evaluator(), settings)
}

/// Insert a pending habit for `user` and return it
pub fn pending_habit(store: &MemoryStore, user: UserId, id: HabitId, points: u32, date: NaiveDate) -> Habit {
    let habit = Habit::new(id, format!("Habit {}", id), points, date);
    store.insert_habit(user, habit.clone());
    habit
}

/// Insert an already completed habit for `user`
pub fn completed_habit(store: &MemoryStore, user: UserId, id: HabitId, points: u32, date: NaiveDate) -> Habit {
    let habit = Habit::new(id, format!("Habit {}", id), points, date)
        .with_status(habitcore::HabitStatus::Completed);
    store.insert_habit(user, habit.clone());
    habit
}

/// On-disk SQLite store inside a fresh temp dir
pub fn temp_sqlite() -> (TempDir, SqliteStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = SqliteStore::open(&dir.path().join("habitcore.db")).expect("Failed to open db");
    (dir, store)
}

/// Profile store that reads through to `inner` but refuses every write
pub struct FailingSaveStore {
    pub inner: Arc<MemoryStore>,
}

impl ProfileStore for FailingSaveStore {
    fn get(&self, user: UserId) -> Result<Option<Profile>, StoreError> {
        self.inner.get(user)
    }

    fn save(&self, _profile: &Profile) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("writes disabled".to_string()))
    }
}
