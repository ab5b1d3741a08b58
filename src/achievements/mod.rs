//! Achievements unlocked by profile milestones
//!
//! Streak, habit-creation, completion and points milestones, each worth a
//! points bonus that is reported alongside the unlock.

mod checker;
mod definitions;

pub use checker::{newly_unlocked, unlocked};
pub use definitions::{Achievement, AchievementCategory, AchievementId, Requirement, ACHIEVEMENTS};
