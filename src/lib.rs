//! habitcore - points, streaks and levels for a habit tracker
//!
//! habitcore keeps a small scoring profile per user and updates it whenever
//! a habit instance is checked off or un-checked. A declarative rule base
//! answers the questions around it: which habits to suggest, whether a
//! streak counts as consistent, what bonus a streak earns and which level a
//! points total maps to.
//!
//! ## Layers
//!
//! 1. **Rules**: a read-only table loaded once from YAML/TOML (or the
//!    embedded default) and queried with first-match semantics.
//!
//! 2. **Ledger**: the profile state machine, reacting to
//!    pending <-> completed transitions.
//!
//! 3. **Facade**: [`Gamification`] wires both to a profile store and a habit
//!    query, serializing updates per user.

pub mod achievements;
pub mod config;
pub mod domain;
pub mod error;
pub mod gamification;
pub mod ledger;
pub mod rules;
pub mod store;

pub use domain::*;
pub use error::GamificationError;
pub use gamification::{Gamification, ProfileSummary, TransitionReport};
