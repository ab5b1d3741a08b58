//! Fact tables backing the rule evaluator
//!
//! Every table is an ordered list. Lookups walk the rows top to bottom and
//! the row order is part of the contract: when two rows could answer the
//! same query, the earlier one wins.

use serde::{Deserialize, Serialize};

/// Inclusive numeric range used by tiers and bands.
///
/// `max = None` means the range is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub min: u32,
    pub max: Option<u32>,
}

impl Band {
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && self.max.is_none_or(|max| value <= max)
    }

    fn is_valid(&self) -> bool {
        self.max.is_none_or(|max| self.min <= max)
    }
}

/// Category -> suggested habit names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    #[serde(default)]
    pub habits: Vec<String>,
}

/// Difficulty label -> suggested habit names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRule {
    pub difficulty: String,
    #[serde(default)]
    pub habits: Vec<String>,
}

/// A streak range considered consistent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyRule {
    #[serde(default)]
    pub min: u32,
    #[serde(default)]
    pub max: Option<u32>,
}

/// Streak range -> bonus points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTier {
    #[serde(default)]
    pub min: u32,
    #[serde(default)]
    pub max: Option<u32>,
    pub bonus: u32,
}

/// Points range -> level label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBand {
    #[serde(default)]
    pub min: u32,
    #[serde(default)]
    pub max: Option<u32>,
    pub label: String,
}

impl ConsistencyRule {
    pub fn band(&self) -> Band {
        Band { min: self.min, max: self.max }
    }
}

impl BonusTier {
    pub fn band(&self) -> Band {
        Band { min: self.min, max: self.max }
    }
}

impl LevelBand {
    pub fn band(&self) -> Band {
        Band { min: self.min, max: self.max }
    }
}

/// The complete, immutable rule base
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBase {
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
    #[serde(default)]
    pub difficulties: Vec<DifficultyRule>,
    #[serde(default)]
    pub consistency: Vec<ConsistencyRule>,
    #[serde(default)]
    pub bonus_tiers: Vec<BonusTier>,
    #[serde(default)]
    pub levels: Vec<LevelBand>,
}

impl RuleBase {
    /// Check structural soundness of the loaded tables.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(rule) = self.categories.iter().find(|r| r.category.trim().is_empty()) {
            return Err(format!("category rule with empty name ({} habits)", rule.habits.len()));
        }
        if let Some(rule) = self.difficulties.iter().find(|r| r.difficulty.trim().is_empty()) {
            return Err(format!("difficulty rule with empty name ({} habits)", rule.habits.len()));
        }

        let bands = self
            .consistency
            .iter()
            .map(|r| ("consistency", r.band()))
            .chain(self.bonus_tiers.iter().map(|t| ("bonus tier", t.band())))
            .chain(self.levels.iter().map(|l| ("level band", l.band())));
        for (table, band) in bands {
            if !band.is_valid() {
                return Err(format!(
                    "{} has min {} greater than max {}",
                    table,
                    band.min,
                    band.max.unwrap_or_default()
                ));
            }
        }

        if let Some(level) = self.levels.iter().find(|l| l.label.trim().is_empty()) {
            return Err(format!("level band starting at {} has an empty label", level.min));
        }

        Ok(())
    }

    /// Total number of facts across all tables
    pub fn fact_count(&self) -> usize {
        self.categories.len()
            + self.difficulties.len()
            + self.consistency.len()
            + self.bonus_tiers.len()
            + self.levels.len()
    }
}
