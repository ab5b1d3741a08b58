//! Error types shared across the engine

use crate::domain::{HabitId, UserId};
use crate::store::StoreError;

/// Errors reported by the gamification facade
///
/// None of these leave a partial mutation behind: the profile is only
/// written once every check has passed.
#[derive(Debug, thiserror::Error)]
pub enum GamificationError {
    #[error("Profile not found for user {0}")]
    ProfileNotFound(UserId),

    #[error("Habit not found: {0}")]
    HabitNotFound(HabitId),

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
