//! Persistence collaborators
//!
//! The engine only needs two narrow interfaces: reading and writing a
//! user's profile counters, and listing the habits a user completed on a
//! given day. Two adapters ship with the crate:
//!
//! - [`MemoryStore`] keeps everything in process (tests, embedding)
//! - [`SqliteStore`] persists to a SQLite file (`~/.habitcore/habitcore.db`)

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{NewHabit, SqliteStore, SqliteTx};

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{Habit, Profile, UserId};

/// Error type for store adapters
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read and write access to profile counters
pub trait ProfileStore {
    fn get(&self, user: UserId) -> Result<Option<Profile>, StoreError>;

    fn save(&self, profile: &Profile) -> Result<(), StoreError>;
}

/// Read-only habit lookup used for streak decisions
pub trait HabitQuery {
    /// Habits owned by `user`, dated `date`, with status completed
    fn completed_on(&self, user: UserId, date: NaiveDate) -> Result<Vec<Habit>, StoreError>;
}

impl<T: ProfileStore + ?Sized> ProfileStore for Arc<T> {
    fn get(&self, user: UserId) -> Result<Option<Profile>, StoreError> {
        (**self).get(user)
    }

    fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        (**self).save(profile)
    }
}

impl<T: HabitQuery + ?Sized> HabitQuery for Arc<T> {
    fn completed_on(&self, user: UserId, date: NaiveDate) -> Result<Vec<Habit>, StoreError> {
        (**self).completed_on(user, date)
    }
}
