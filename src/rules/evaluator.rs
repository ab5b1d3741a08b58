//! Rule queries
//!
//! Stateless lookups over a shared `RuleBase`. When no rule base could be
//! loaded every query answers with its fallback value instead of an error.

use std::sync::Arc;

use serde::Serialize;

use super::base::RuleBase;
use super::source::RuleSource;

/// Wire form of `Suggestions::Unavailable`
pub const UNAVAILABLE: &str = "unavailable";

/// Label used when no level band matches
pub const UNKNOWN_LEVEL: &str = "Unknown";

/// Result of a suggestion query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    /// Names in fact-table order (possibly empty)
    Available(Vec<String>),
    /// No rule base is loaded
    Unavailable,
}

impl Suggestions {
    pub fn names(&self) -> &[String] {
        match self {
            Self::Available(names) => names,
            Self::Unavailable => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Flatten into a plain list; `Unavailable` becomes the single
    /// `"unavailable"` sentinel entry.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Available(names) => names,
            Self::Unavailable => vec![UNAVAILABLE.to_string()],
        }
    }
}

impl Serialize for Suggestions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Available(names) => names.serialize(serializer),
            Self::Unavailable => [UNAVAILABLE].serialize(serializer),
        }
    }
}

impl std::fmt::Display for Suggestions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(names) => write!(f, "{}", names.join(", ")),
            Self::Unavailable => write!(f, "{}", UNAVAILABLE),
        }
    }
}

/// Result of a level query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelLabel {
    Named(String),
    Unknown,
}

impl LevelLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(label) => label,
            Self::Unknown => UNKNOWN_LEVEL,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

impl PartialEq<&str> for LevelLabel {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for LevelLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for LevelLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Query interface over an optional rule base
#[derive(Debug, Clone, Default)]
pub struct RuleEvaluator {
    rules: Option<Arc<RuleBase>>,
}

impl RuleEvaluator {
    pub fn new(rules: Arc<RuleBase>) -> Self {
        Self { rules: Some(rules) }
    }

    /// An evaluator with no rule base; every query degrades
    pub fn unavailable() -> Self {
        Self { rules: None }
    }

    /// Load a rule base once from `source`.
    ///
    /// A load failure is logged and yields an unavailable evaluator.
    pub fn load(source: &dyn RuleSource) -> Self {
        match source.load() {
            Ok(rules) => {
                tracing::info!(
                    "Loaded rule base from {} ({} facts)",
                    source.describe(),
                    rules.fact_count()
                );
                Self::new(Arc::new(rules))
            }
            Err(e) => {
                tracing::warn!(
                    "Rule base unavailable, failed to load {}: {}",
                    source.describe(),
                    e
                );
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.rules.is_some()
    }

    pub fn rule_base(&self) -> Option<&RuleBase> {
        self.rules.as_deref()
    }

    /// Every habit name associated with `category`, in table order
    pub fn suggest_habits_by_category(&self, category: &str) -> Suggestions {
        let Some(rules) = self.rule_base() else {
            return Suggestions::Unavailable;
        };
        let names = rules
            .categories
            .iter()
            .filter(|r| r.category == category)
            .flat_map(|r| r.habits.iter().cloned())
            .collect();
        Suggestions::Available(names)
    }

    /// Every habit name associated with difficulty `level`, in table order
    pub fn suggest_habits_by_difficulty(&self, level: &str) -> Suggestions {
        let Some(rules) = self.rule_base() else {
            return Suggestions::Unavailable;
        };
        let names = rules
            .difficulties
            .iter()
            .filter(|r| r.difficulty == level)
            .flat_map(|r| r.habits.iter().cloned())
            .collect();
        Suggestions::Available(names)
    }

    pub fn is_streak_consistent(&self, streak: u32) -> bool {
        self.rule_base()
            .map(|rules| rules.consistency.iter().any(|r| r.band().contains(streak)))
            .unwrap_or(false)
    }

    /// Bonus of the first tier containing `streak`, or 0
    pub fn bonus_for_streak(&self, streak: u32) -> u32 {
        self.rule_base()
            .and_then(|rules| rules.bonus_tiers.iter().find(|t| t.band().contains(streak)))
            .map(|t| t.bonus)
            .unwrap_or(0)
    }

    /// Label of the first band containing `points`
    pub fn level_for_points(&self, points: u32) -> LevelLabel {
        self.rule_base()
            .and_then(|rules| rules.levels.iter().find(|l| l.band().contains(points)))
            .map(|l| LevelLabel::Named(l.label.clone()))
            .unwrap_or(LevelLabel::Unknown)
    }
}
