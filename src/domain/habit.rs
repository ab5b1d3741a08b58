use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique identifier for a habit instance
pub type HabitId = u64;

/// The status of a habit instance
///
/// Only two states exist. A habit moves pending -> completed when the user
/// checks it off and completed -> pending when the check is undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitStatus {
    /// Not done yet
    #[default]
    #[serde(alias = "pendiente")]
    Pending,
    /// Checked off for its day
    #[serde(alias = "completado")]
    Completed,
}

impl HabitStatus {
    /// Get the status marker string used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitStatus::Pending => "pending",
            HabitStatus::Completed => "completed",
        }
    }

    /// Parse a stored or user-supplied status marker.
    ///
    /// Accepts the legacy markers (`pendiente`, `completado`) still found in
    /// older databases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" | "pendiente" => Some(Self::Pending),
            "completed" | "completado" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for HabitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A habit instance belonging to a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    /// Reward granted on completion
    pub points: u32,
    /// Free-form label, e.g. "Health"
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: HabitStatus,
    /// The day this instance belongs to
    pub date: NaiveDate,
}

impl Habit {
    pub fn new(id: HabitId, name: impl Into<String>, points: u32, date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            points,
            category: None,
            status: HabitStatus::Pending,
            date,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: HabitStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == HabitStatus::Completed
    }
}
