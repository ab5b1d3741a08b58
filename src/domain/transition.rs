use chrono::NaiveDate;
use serde::Serialize;

use super::habit::{Habit, HabitStatus};
use crate::error::GamificationError;

/// A habit status change, the only event the ledger reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    pub habit: Habit,
    pub old_status: HabitStatus,
    pub new_status: HabitStatus,
    /// The calendar day the change happened on
    pub today: NaiveDate,
}

/// The edge a transition event walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionEdge {
    /// pending -> completed
    Complete,
    /// completed -> pending
    Undo,
    /// old and new status are equal
    Unchanged,
}

impl TransitionEvent {
    pub fn new(habit: Habit, old_status: HabitStatus, new_status: HabitStatus, today: NaiveDate) -> Self {
        Self {
            habit,
            old_status,
            new_status,
            today,
        }
    }

    /// Shorthand for a pending -> completed event
    pub fn complete(habit: Habit, today: NaiveDate) -> Self {
        Self::new(habit, HabitStatus::Pending, HabitStatus::Completed, today)
    }

    /// Shorthand for a completed -> pending event
    pub fn undo(habit: Habit, today: NaiveDate) -> Self {
        Self::new(habit, HabitStatus::Completed, HabitStatus::Pending, today)
    }

    /// Build an event from raw status markers.
    ///
    /// Fails with `InvalidTransition` when either marker is not a known status.
    pub fn parse(
        habit: Habit,
        old_status: &str,
        new_status: &str,
        today: NaiveDate,
    ) -> Result<Self, GamificationError> {
        match (HabitStatus::parse(old_status), HabitStatus::parse(new_status)) {
            (Some(old), Some(new)) => Ok(Self::new(habit, old, new, today)),
            _ => Err(GamificationError::InvalidTransition {
                from: old_status.to_string(),
                to: new_status.to_string(),
            }),
        }
    }

    pub fn edge(&self) -> TransitionEdge {
        match (self.old_status, self.new_status) {
            (HabitStatus::Pending, HabitStatus::Completed) => TransitionEdge::Complete,
            (HabitStatus::Completed, HabitStatus::Pending) => TransitionEdge::Undo,
            _ => TransitionEdge::Unchanged,
        }
    }

    /// The day before `today`, or `None` when `today` is the first
    /// representable date
    pub fn yesterday(&self) -> Option<NaiveDate> {
        self.today.pred_opt()
    }
}
