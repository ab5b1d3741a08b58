//! Gamification facade - the single entry point for the surrounding app
//!
//! Composes the streak ledger, the rule evaluator and the two store
//! collaborators. The facade keeps no counters of its own; everything it
//! computes comes from the stored profile plus the incoming event, so any
//! call can be retried.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::achievements::{self, Achievement, AchievementId};
use crate::domain::{Habit, HabitId, HabitStatus, Profile, TransitionEdge, TransitionEvent, UserId};
use crate::error::GamificationError;
use crate::ledger::{CompletionContext, LedgerSettings, StreakChange, StreakLedger};
use crate::rules::{LevelLabel, RuleEvaluator, Suggestions};
use crate::store::{HabitQuery, NewHabit, ProfileStore, SqliteStore};

/// Entries kept in the lock registry before idle ones are pruned
const LOCK_PRUNE_THRESHOLD: usize = 1024;

/// What a transition did to a profile
#[derive(Debug, Clone, Serialize)]
pub struct TransitionReport {
    /// Counters after the transition (unchanged for a no-op)
    pub profile: Profile,
    pub edge: TransitionEdge,
    pub streak_change: StreakChange,
    pub points_delta: i64,
    pub bonus_awarded: u32,
    /// Achievements reached by this transition
    pub new_achievements: Vec<&'static Achievement>,
}

/// Profile counters plus everything the rules say about them
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub profile: Profile,
    pub level: LevelLabel,
    pub consistent: bool,
    /// Bonus the next streak day would be worth
    pub next_bonus: u32,
    pub achievements: Vec<AchievementId>,
}

/// Per-user mutexes serializing read-modify-write on a profile
#[derive(Debug, Default)]
struct UserLocks {
    inner: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    fn handle(&self, user: UserId) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if map.len() >= LOCK_PRUNE_THRESHOLD {
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        map.entry(user).or_default().clone()
    }
}

/// Main facade over all gamification features
pub struct Gamification<S, Q> {
    profiles: S,
    habits: Q,
    evaluator: RuleEvaluator,
    ledger: StreakLedger,
    locks: UserLocks,
}

impl<S: ProfileStore, Q: HabitQuery> Gamification<S, Q> {
    pub fn new(profiles: S, habits: Q, evaluator: RuleEvaluator, settings: LedgerSettings) -> Self {
        let ledger = StreakLedger::new(evaluator.clone(), settings);
        Self {
            profiles,
            habits,
            evaluator,
            ledger,
            locks: UserLocks::default(),
        }
    }

    // ========================================
    // PROFILE OPERATIONS
    // ========================================

    /// Apply a habit status change to `user`'s profile.
    ///
    /// The profile is read and written under the user's lock. A missing
    /// profile or a failing store leaves the stored counters untouched.
    pub fn apply_transition(
        &self,
        user: UserId,
        event: &TransitionEvent,
    ) -> Result<TransitionReport, GamificationError> {
        let lock = self.locks.handle(user);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.apply_with(&self.profiles, &self.habits, user, event)
    }

    /// Count a newly created habit for `user`
    pub fn record_habit_created(&self, user: UserId) -> Result<Profile, GamificationError> {
        let lock = self.locks.handle(user);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.record_created_with(&self.profiles, user)
    }

    fn apply_with<P: ProfileStore, H: HabitQuery>(
        &self,
        profiles: &P,
        habits: &H,
        user: UserId,
        event: &TransitionEvent,
    ) -> Result<TransitionReport, GamificationError> {
        let profile = profiles
            .get(user)?
            .ok_or(GamificationError::ProfileNotFound(user))?;

        let ctx = match event.edge() {
            TransitionEdge::Complete => {
                let yesterday = match event.yesterday() {
                    Some(date) => habits.completed_on(user, date)?,
                    None => Vec::new(),
                };
                let today = habits.completed_on(user, event.today)?;
                CompletionContext::from_completed(event, &yesterday, &today)
            }
            TransitionEdge::Undo => CompletionContext::default(),
            TransitionEdge::Unchanged => {
                debug!(
                    "Habit {} stayed {}, nothing to apply for user {}",
                    event.habit.id, event.new_status, user
                );
                return Ok(TransitionReport {
                    profile,
                    edge: TransitionEdge::Unchanged,
                    streak_change: StreakChange::Kept,
                    points_delta: 0,
                    bonus_awarded: 0,
                    new_achievements: Vec::new(),
                });
            }
        };

        let outcome = self.ledger.apply(&profile, event, &ctx);
        profiles.save(&outcome.profile)?;

        let p = &outcome.profile;
        match outcome.edge {
            TransitionEdge::Complete => {
                info!(
                    "User {} completed habit {}: +{} points (bonus {}), total {}",
                    user, event.habit.id, event.habit.points, outcome.bonus_awarded, p.points_total
                );
                info!("Streak: {} days (max: {})", p.streak_current, p.streak_max);
            }
            _ => {
                info!(
                    "User {} undid habit {}: -{} points, total {}",
                    user,
                    event.habit.id,
                    outcome.before.points_total - p.points_total,
                    p.points_total
                );
            }
        }

        let new_achievements = achievements::newly_unlocked(&outcome.before, p);
        for a in &new_achievements {
            info!("User {} unlocked achievement '{}'", user, a.name);
        }

        Ok(TransitionReport {
            profile: outcome.profile,
            edge: outcome.edge,
            streak_change: outcome.streak_change,
            points_delta: outcome.points_delta(),
            bonus_awarded: outcome.bonus_awarded,
            new_achievements,
        })
    }

    fn record_created_with<P: ProfileStore>(&self, profiles: &P, user: UserId) -> Result<Profile, GamificationError> {
        let mut profile = profiles
            .get(user)?
            .ok_or(GamificationError::ProfileNotFound(user))?;
        profile.habits_created = profile.habits_created.saturating_add(1);
        profiles.save(&profile)?;

        debug!("User {} has created {} habits", user, profile.habits_created);
        Ok(profile)
    }

    pub fn profile_summary(&self, user: UserId) -> Result<ProfileSummary, GamificationError> {
        let profile = self
            .profiles
            .get(user)?
            .ok_or(GamificationError::ProfileNotFound(user))?;

        Ok(ProfileSummary {
            level: self.evaluator.level_for_points(profile.points_total),
            consistent: self.evaluator.is_streak_consistent(profile.streak_current),
            next_bonus: self
                .evaluator
                .bonus_for_streak(profile.streak_current.saturating_add(1)),
            achievements: achievements::unlocked(&profile).iter().map(|a| a.id).collect(),
            profile,
        })
    }

    pub fn achievements_for(&self, user: UserId) -> Result<Vec<&'static Achievement>, GamificationError> {
        let profile = self
            .profiles
            .get(user)?
            .ok_or(GamificationError::ProfileNotFound(user))?;
        Ok(achievements::unlocked(&profile))
    }

    // ========================================
    // RULE QUERIES
    // ========================================

    pub fn suggest_by_category(&self, category: &str) -> Suggestions {
        self.evaluator.suggest_habits_by_category(category)
    }

    pub fn suggest_by_difficulty(&self, difficulty: &str) -> Suggestions {
        self.evaluator.suggest_habits_by_difficulty(difficulty)
    }

    pub fn check_consistency(&self, streak: u32) -> bool {
        self.evaluator.is_streak_consistent(streak)
    }

    pub fn compute_bonus(&self, streak: u32) -> u32 {
        self.evaluator.bonus_for_streak(streak)
    }

    pub fn classify_level(&self, points: u32) -> LevelLabel {
        self.evaluator.level_for_points(points)
    }
}

/// Operations that keep habit rows and profile counters in one SQLite
/// transaction.
///
/// Each call holds the database write lock from the first read to the
/// profile save, so concurrent writers in other processes cannot interleave.
/// These calls take no per-user lock; the write lock already orders them.
impl Gamification<SqliteStore, SqliteStore> {
    /// Change a habit's status and account for it on its owner's profile.
    ///
    /// On any error the habit keeps its previous status and the profile is
    /// left as it was.
    pub fn set_habit_status(
        &self,
        id: HabitId,
        status: HabitStatus,
        today: NaiveDate,
    ) -> Result<TransitionReport, GamificationError> {
        self.profiles.transaction(|tx| -> Result<_, GamificationError> {
            let habit = tx.get_habit(id)?.ok_or(GamificationError::HabitNotFound(id))?;
            let user = tx.habit_owner(id)?.ok_or(GamificationError::HabitNotFound(id))?;

            let previous = tx.set_habit_status(id, status)?;
            let event = TransitionEvent::new(habit.with_status(status), previous, status, today);
            self.apply_with(tx, tx, user, &event)
        })
    }

    /// Insert a pending habit for `user` and count it as created
    pub fn add_habit(&self, user: UserId, new: &NewHabit) -> Result<(Habit, Profile), GamificationError> {
        self.profiles.transaction(|tx| -> Result<_, GamificationError> {
            let profile = self.record_created_with(tx, user)?;
            let habit = tx.add_habit(user, new)?;
            debug!("Habit {} added for user {}", habit.id, user);
            Ok((habit, profile))
        })
    }
}
