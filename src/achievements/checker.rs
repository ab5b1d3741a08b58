//! Achievement checking logic

use super::definitions::{Achievement, Requirement, ACHIEVEMENTS};
use crate::domain::Profile;

impl Requirement {
    /// Whether `profile` satisfies this requirement
    pub fn is_met(&self, profile: &Profile) -> bool {
        match *self {
            Requirement::Streak(n) => profile.streak_max >= n,
            Requirement::HabitsCreated(n) => profile.habits_created >= n,
            Requirement::Completed(n) => profile.habits_completed >= n,
            Requirement::Points(n) => profile.points_total >= n,
        }
    }

    /// Current value and target, for progress display
    pub fn progress(&self, profile: &Profile) -> (u32, u32) {
        let (value, target) = match *self {
            Requirement::Streak(n) => (profile.streak_max, n),
            Requirement::HabitsCreated(n) => (profile.habits_created, n),
            Requirement::Completed(n) => (profile.habits_completed, n),
            Requirement::Points(n) => (profile.points_total, n),
        };
        (value.min(target), target)
    }
}

/// Every achievement `profile` currently qualifies for, in table order
pub fn unlocked(profile: &Profile) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.requirement.is_met(profile))
        .collect()
}

/// Achievements met by `after` but not by `before`
///
/// Undo can take points away, so an achievement may also drop out; only
/// gains are reported.
pub fn newly_unlocked(before: &Profile, after: &Profile) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.requirement.is_met(after) && !a.requirement.is_met(before))
        .collect()
}
