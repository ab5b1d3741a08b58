//! Core domain types for habitcore

mod habit;
mod profile;
mod transition;

pub use habit::{Habit, HabitId, HabitStatus};
pub use profile::{Profile, UserId};
pub use transition::{TransitionEdge, TransitionEvent};
