//! In-process store

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use super::{HabitQuery, ProfileStore, StoreError};
use crate::domain::{Habit, HabitId, HabitStatus, Profile, UserId};

/// Profiles and habits held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<UserId, Profile>>,
    habits: RwLock<HashMap<HabitId, (UserId, Habit)>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn profiles(&self) -> RwLockReadGuard<'_, HashMap<UserId, Profile>> {
        self.profiles.read().unwrap_or_else(|e| e.into_inner())
    }

    fn profiles_mut(&self) -> RwLockWriteGuard<'_, HashMap<UserId, Profile>> {
        self.profiles.write().unwrap_or_else(|e| e.into_inner())
    }

    fn habits(&self) -> RwLockReadGuard<'_, HashMap<HabitId, (UserId, Habit)>> {
        self.habits.read().unwrap_or_else(|e| e.into_inner())
    }

    fn habits_mut(&self) -> RwLockWriteGuard<'_, HashMap<HabitId, (UserId, Habit)>> {
        self.habits.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert or replace a profile
    pub fn insert_profile(&self, profile: Profile) {
        self.profiles_mut().insert(profile.user_id, profile);
    }

    /// Insert or replace a habit owned by `user`
    pub fn insert_habit(&self, user: UserId, habit: Habit) {
        self.habits_mut().insert(habit.id, (user, habit));
    }

    /// Change a habit's stored status, returning the previous one
    pub fn set_habit_status(&self, id: HabitId, status: HabitStatus) -> Option<HabitStatus> {
        let mut habits = self.habits_mut();
        let (_, habit) = habits.get_mut(&id)?;
        Some(std::mem::replace(&mut habit.status, status))
    }

    pub fn habit(&self, id: HabitId) -> Option<Habit> {
        self.habits().get(&id).map(|(_, h)| h.clone())
    }

    /// Number of successful `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, user: UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles().get(&user).copied())
    }

    fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        self.profiles_mut().insert(profile.user_id, *profile);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl HabitQuery for MemoryStore {
    fn completed_on(&self, user: UserId, date: NaiveDate) -> Result<Vec<Habit>, StoreError> {
        let mut found: Vec<Habit> = self
            .habits()
            .values()
            .filter(|(owner, h)| *owner == user && h.date == date && h.is_completed())
            .map(|(_, h)| h.clone())
            .collect();
        found.sort_by_key(|h| h.id);
        Ok(found)
    }
}
