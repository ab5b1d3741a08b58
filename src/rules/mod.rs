//! Habit suggestion and reward rules
//!
//! A declarative rule base (category/difficulty suggestions, streak
//! consistency, streak bonus tiers and level bands) plus the evaluator that
//! answers queries against it with first-match-in-table-order semantics.

mod base;
mod evaluator;
mod source;

pub use base::{Band, BonusTier, CategoryRule, ConsistencyRule, DifficultyRule, LevelBand, RuleBase};
pub use evaluator::{LevelLabel, RuleEvaluator, Suggestions, UNAVAILABLE, UNKNOWN_LEVEL};
pub use source::{
    default_rule_base, parse_toml, parse_yaml, EmbeddedRuleSource, FileRuleSource, RuleLoadError,
    RuleSource, DEFAULT_RULES_YAML,
};
