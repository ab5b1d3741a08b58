//! Streak and points ledger
//!
//! Applies a single habit transition to a user's profile counters. The
//! ledger is a pure function of `(profile, event, context)`: it never touches
//! storage and never fails for valid input.
//!
//! Completion (`pending -> completed`):
//! - add the habit's points and count the completion
//! - extend the streak if anything was completed yesterday, otherwise restart
//!   it at 1 when this is the first completion today, otherwise leave it
//! - raise `streak_max` to `streak_current` if needed
//!
//! Undo (`completed -> pending`) only takes back points and the completion
//! count. Streak counters are never lowered by an undo.

mod context;

pub use context::CompletionContext;

use serde::{Deserialize, Serialize};

use crate::domain::{Profile, TransitionEdge, TransitionEvent};
use crate::rules::RuleEvaluator;

/// Ledger behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Add the rule base's streak bonus when a completion extends or
    /// restarts the streak. Undo does not take the bonus back.
    #[serde(default)]
    pub award_streak_bonus: bool,
}

/// How a transition affected the current streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakChange {
    /// Continued from yesterday
    Extended,
    /// Started over at 1
    Restarted,
    /// Left as it was
    Kept,
}

/// The result of applying a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerOutcome {
    pub before: Profile,
    pub profile: Profile,
    pub edge: TransitionEdge,
    pub streak_change: StreakChange,
    /// Streak bonus added on top of the habit's points
    pub bonus_awarded: u32,
}

impl LedgerOutcome {
    /// Whether any counter moved
    pub fn changed(&self) -> bool {
        self.before != self.profile
    }

    /// Signed change of `points_total`
    pub fn points_delta(&self) -> i64 {
        i64::from(self.profile.points_total) - i64::from(self.before.points_total)
    }
}

/// The profile state machine
#[derive(Debug, Clone, Default)]
pub struct StreakLedger {
    evaluator: RuleEvaluator,
    settings: LedgerSettings,
}

impl StreakLedger {
    pub fn new(evaluator: RuleEvaluator, settings: LedgerSettings) -> Self {
        Self { evaluator, settings }
    }

    /// Apply `event` to `profile` and return the updated counters
    pub fn apply(
        &self,
        profile: &Profile,
        event: &TransitionEvent,
        ctx: &CompletionContext,
    ) -> LedgerOutcome {
        let edge = event.edge();
        let mut outcome = LedgerOutcome {
            before: *profile,
            profile: *profile,
            edge,
            streak_change: StreakChange::Kept,
            bonus_awarded: 0,
        };

        match edge {
            TransitionEdge::Complete => self.complete(&mut outcome, event, ctx),
            TransitionEdge::Undo => Self::undo(&mut outcome, event),
            TransitionEdge::Unchanged => {}
        }

        outcome
    }

    fn complete(&self, outcome: &mut LedgerOutcome, event: &TransitionEvent, ctx: &CompletionContext) {
        let p = &mut outcome.profile;
        p.points_total = p.points_total.saturating_add(event.habit.points);
        p.habits_completed = p.habits_completed.saturating_add(1);

        if ctx.completed_yesterday {
            p.streak_current = p.streak_current.saturating_add(1);
            outcome.streak_change = StreakChange::Extended;
        } else if ctx.completed_today_count == 1 {
            p.streak_current = 1;
            outcome.streak_change = StreakChange::Restarted;
        }
        // Neither yesterday nor first today: the streak keeps whatever value
        // it had, even if that value is stale.

        p.streak_max = p.streak_max.max(p.streak_current);

        if self.settings.award_streak_bonus && outcome.streak_change != StreakChange::Kept {
            let bonus = self.evaluator.bonus_for_streak(p.streak_current);
            p.points_total = p.points_total.saturating_add(bonus);
            outcome.bonus_awarded = bonus;
        }
    }

    fn undo(outcome: &mut LedgerOutcome, event: &TransitionEvent) {
        let p = &mut outcome.profile;
        p.points_total = p.points_total.saturating_sub(event.habit.points);
        p.habits_completed = p.habits_completed.saturating_sub(1);
    }
}
