//! SQLite-backed store
//!
//! Manages the `~/.habitcore/habitcore.db` database with automatic schema
//! migration. Habits are linked to users through the `user_habits`
//! association table.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior};

use super::{HabitQuery, ProfileStore, StoreError};
use crate::domain::{Habit, HabitId, HabitStatus, Profile, UserId};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// How long a writer waits for another connection's transaction
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Fields for a habit that does not exist yet
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub name: String,
    pub points: u32,
    pub category: Option<String>,
    pub date: NaiveDate,
}

/// Database wrapper shared across threads
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

/// Queries over one locked connection, usually inside a transaction
pub struct SqliteTx<'a> {
    conn: &'a Connection,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        // Other processes may hold the write lock for a transition
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Self::with_connection(conn)
    }

    /// A private in-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()
    }

    fn run_migrations(&self) -> Result<(), StoreError> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        // Migration 2: day lookups for streak checks
        if version < 2 {
            conn.execute_batch(
                r#"
                CREATE INDEX IF NOT EXISTS idx_habits_day ON habits(date, status);
                CREATE INDEX IF NOT EXISTS idx_user_habits_habit ON user_habits(habit_id);
                "#,
            )?;
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        Ok(())
    }

    /// Run `f` with the connection locked, outside any transaction
    fn read<T>(&self, f: impl FnOnce(&SqliteTx<'_>) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let conn = self.conn();
        f(&SqliteTx { conn: &conn })
    }

    /// Run `f` inside a `BEGIN IMMEDIATE` transaction.
    ///
    /// The database write lock is taken up front, so read-modify-write
    /// sequences in `f` are serialized against every other connection,
    /// including ones in other processes. The transaction commits when `f`
    /// returns `Ok` and rolls back otherwise.
    pub fn transaction<T, E>(&self, f: impl FnOnce(&SqliteTx<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut conn = self.conn();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;
        let out = f(&SqliteTx { conn: &tx })?;
        tx.commit().map_err(StoreError::from)?;
        Ok(out)
    }

    /// Create an empty profile for `user` (no-op if it exists) and return it
    pub fn create_profile(&self, user: UserId) -> Result<Profile, StoreError> {
        self.read(|tx| tx.create_profile(user))
    }

    /// Insert a pending habit and link it to `user`
    pub fn add_habit(&self, user: UserId, new: &NewHabit) -> Result<Habit, StoreError> {
        self.transaction(|tx| tx.add_habit(user, new))
    }

    pub fn get_habit(&self, id: HabitId) -> Result<Option<Habit>, StoreError> {
        self.read(|tx| tx.get_habit(id))
    }

    /// The user a habit is linked to
    pub fn habit_owner(&self, id: HabitId) -> Result<Option<UserId>, StoreError> {
        self.read(|tx| tx.habit_owner(id))
    }

    /// Store a new status for a habit, returning the previous one
    pub fn set_habit_status(&self, id: HabitId, status: HabitStatus) -> Result<HabitStatus, StoreError> {
        self.transaction(|tx| tx.set_habit_status(id, status))
    }

    /// All habits linked to `user`, newest day first
    pub fn habits_for(&self, user: UserId) -> Result<Vec<Habit>, StoreError> {
        self.read(|tx| tx.habits_for(user))
    }

    /// Profiles ordered by points, highest first
    pub fn ranking(&self, limit: usize) -> Result<Vec<Profile>, StoreError> {
        self.read(|tx| tx.ranking(limit))
    }
}

impl ProfileStore for SqliteStore {
    fn get(&self, user: UserId) -> Result<Option<Profile>, StoreError> {
        self.read(|tx| tx.get(user))
    }

    fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        self.read(|tx| tx.save(profile))
    }
}

impl HabitQuery for SqliteStore {
    fn completed_on(&self, user: UserId, date: NaiveDate) -> Result<Vec<Habit>, StoreError> {
        self.read(|tx| tx.completed_on(user, date))
    }
}

impl SqliteTx<'_> {
    pub fn create_profile(&self, user: UserId) -> Result<Profile, StoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO profiles (user_id, created_at) VALUES (?1, ?2)",
            (user as i64, Utc::now().timestamp_millis()),
        )?;
        self.get(user)?
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", user)))
    }

    /// Insert a pending habit and link it to `user`.
    ///
    /// Both rows are written by the caller's transaction.
    pub fn add_habit(&self, user: UserId, new: &NewHabit) -> Result<Habit, StoreError> {
        self.conn.execute(
            "INSERT INTO habits (name, points, category, status, date) VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                &new.name,
                new.points,
                &new.category,
                HabitStatus::Pending.as_str(),
                new.date.format(DATE_FORMAT).to_string(),
            ),
        )?;
        let id = self.conn.last_insert_rowid();
        self.conn.execute(
            "INSERT INTO user_habits (user_id, habit_id) VALUES (?1, ?2)",
            (user as i64, id),
        )?;

        Ok(Habit {
            id: id as HabitId,
            name: new.name.clone(),
            points: new.points,
            category: new.category.clone(),
            status: HabitStatus::Pending,
            date: new.date,
        })
    }

    pub fn get_habit(&self, id: HabitId) -> Result<Option<Habit>, StoreError> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, name, points, category, status, date FROM habits WHERE id = ?1",
                [id as i64],
                RawHabit::from_row,
            )
            .optional()?;
        raw.map(RawHabit::into_habit).transpose()
    }

    pub fn habit_owner(&self, id: HabitId) -> Result<Option<UserId>, StoreError> {
        let owner: Option<i64> = self
            .conn
            .query_row(
                "SELECT user_id FROM user_habits WHERE habit_id = ?1 ORDER BY user_id LIMIT 1",
                [id as i64],
                |r| r.get(0),
            )
            .optional()?;
        Ok(owner.map(|u| u as UserId))
    }

    /// Store a new status for a habit, returning the previous one
    pub fn set_habit_status(&self, id: HabitId, status: HabitStatus) -> Result<HabitStatus, StoreError> {
        let previous = self
            .get_habit(id)?
            .ok_or_else(|| StoreError::NotFound(format!("habit {}", id)))?
            .status;

        self.conn.execute(
            "UPDATE habits SET status = ?1 WHERE id = ?2",
            (status.as_str(), id as i64),
        )?;
        Ok(previous)
    }

    pub fn habits_for(&self, user: UserId) -> Result<Vec<Habit>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"SELECT h.id, h.name, h.points, h.category, h.status, h.date
               FROM habits h JOIN user_habits uh ON uh.habit_id = h.id
               WHERE uh.user_id = ?1
               ORDER BY h.date DESC, h.id"#,
        )?;
        let rows = stmt
            .query_map([user as i64], RawHabit::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawHabit::into_habit).collect()
    }

    pub fn ranking(&self, limit: usize) -> Result<Vec<Profile>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"SELECT user_id, points_total, streak_current, streak_max, habits_completed, habits_created
               FROM profiles
               ORDER BY points_total DESC, user_id ASC
               LIMIT ?1"#,
        )?;
        let profiles = stmt
            .query_map([limit as i64], profile_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(profiles)
    }
}

impl ProfileStore for SqliteTx<'_> {
    fn get(&self, user: UserId) -> Result<Option<Profile>, StoreError> {
        let profile = self
            .conn
            .query_row(
                r#"SELECT user_id, points_total, streak_current, streak_max, habits_completed, habits_created
                   FROM profiles WHERE user_id = ?1"#,
                [user as i64],
                profile_from_row,
            )
            .optional()?;
        Ok(profile)
    }

    fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        let updated = self.conn.execute(
            r#"UPDATE profiles SET
                   points_total = ?2, streak_current = ?3, streak_max = ?4,
                   habits_completed = ?5, habits_created = ?6
               WHERE user_id = ?1"#,
            (
                profile.user_id as i64,
                profile.points_total,
                profile.streak_current,
                profile.streak_max,
                profile.habits_completed,
                profile.habits_created,
            ),
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("profile {}", profile.user_id)));
        }
        Ok(())
    }
}

impl HabitQuery for SqliteTx<'_> {
    fn completed_on(&self, user: UserId, date: NaiveDate) -> Result<Vec<Habit>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"SELECT h.id, h.name, h.points, h.category, h.status, h.date
               FROM habits h JOIN user_habits uh ON uh.habit_id = h.id
               WHERE uh.user_id = ?1 AND h.date = ?2
               ORDER BY h.id"#,
        )?;
        let rows = stmt
            .query_map(
                (user as i64, date.format(DATE_FORMAT).to_string()),
                RawHabit::from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        // Status is filtered after parsing so legacy markers count too
        let mut completed = Vec::new();
        for raw in rows {
            let habit = raw.into_habit()?;
            if habit.is_completed() {
                completed.push(habit);
            }
        }
        Ok(completed)
    }
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        user_id: row.get::<_, i64>(0)? as UserId,
        points_total: row.get(1)?,
        streak_current: row.get(2)?,
        streak_max: row.get(3)?,
        habits_completed: row.get(4)?,
        habits_created: row.get(5)?,
    })
}

/// Habit row before status/date parsing
struct RawHabit {
    id: i64,
    name: String,
    points: u32,
    category: Option<String>,
    status: String,
    date: String,
}

impl RawHabit {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            points: row.get(2)?,
            category: row.get(3)?,
            status: row.get(4)?,
            date: row.get(5)?,
        })
    }

    fn into_habit(self) -> Result<Habit, StoreError> {
        let status = HabitStatus::parse(&self.status).ok_or_else(|| {
            StoreError::Corrupt(format!("habit {} has unknown status '{}'", self.id, self.status))
        })?;
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|e| {
            StoreError::Corrupt(format!("habit {} has bad date '{}': {}", self.id, self.date, e))
        })?;
        Ok(Habit {
            id: self.id as HabitId,
            name: self.name,
            points: self.points,
            category: self.category,
            status,
            date,
        })
    }
}

/// SQL schema for the habit database
const SCHEMA_SQL: &str = r#"
-- One row per user
CREATE TABLE IF NOT EXISTS profiles (
    user_id INTEGER PRIMARY KEY,
    points_total INTEGER NOT NULL DEFAULT 0 CHECK (points_total >= 0),
    streak_current INTEGER NOT NULL DEFAULT 0 CHECK (streak_current >= 0),
    streak_max INTEGER NOT NULL DEFAULT 0 CHECK (streak_max >= 0),
    habits_completed INTEGER NOT NULL DEFAULT 0 CHECK (habits_completed >= 0),
    habits_created INTEGER NOT NULL DEFAULT 0 CHECK (habits_created >= 0),
    created_at INTEGER NOT NULL
);

-- Habit instances (one per day)
CREATE TABLE IF NOT EXISTS habits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    points INTEGER NOT NULL DEFAULT 0 CHECK (points >= 0),
    category TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    date TEXT NOT NULL
);

-- Ownership
CREATE TABLE IF NOT EXISTS user_habits (
    user_id INTEGER NOT NULL,
    habit_id INTEGER NOT NULL,
    PRIMARY KEY (user_id, habit_id),
    FOREIGN KEY (habit_id) REFERENCES habits(id) ON DELETE CASCADE
);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;
