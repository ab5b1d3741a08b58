use serde::{Deserialize, Serialize};

/// Unique identifier for a user
pub type UserId = u64;

/// Scoring counters kept per user
///
/// All counters are unsigned, so `points_total >= 0` and
/// `habits_completed >= 0` hold by construction. `streak_max >= streak_current`
/// is maintained by the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub points_total: u32,
    pub streak_current: u32,
    pub streak_max: u32,
    pub habits_completed: u32,
    pub habits_created: u32,
}

impl Profile {
    /// A fresh profile with every counter at zero
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }
}
