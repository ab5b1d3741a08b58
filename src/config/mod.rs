//! Configuration loading and management

mod io;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ledger::LedgerSettings;
use crate::rules::{EmbeddedRuleSource, FileRuleSource, RuleSource};

/// Default configuration content written by `habitcore init`
pub const DEFAULT_CONFIG: &str = r#"# habitcore configuration
# =======================

# ============================================================================
# RULES - Habit suggestions, streak bonus tiers and level bands
# ============================================================================
#
# Leave `path` unset to use the rule table built into the binary.
# Rule files may be YAML (.yaml/.yml) or TOML (.toml). Relative paths are
# resolved against the directory of this file.

[rules]
# path = "rules.yaml"

# ============================================================================
# STORE - Profile and habit database
# ============================================================================

[store]
# path = "/path/to/habitcore.db"   # default: ~/.habitcore/habitcore.db

# ============================================================================
# LEDGER - Points and streak accounting
# ============================================================================
#
#   award_streak_bonus - Add the rule base's streak bonus when a completion
#                        extends or restarts the streak (default: false)

[ledger]
award_streak_bonus = false
"#;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the rule base comes from
    #[serde(default)]
    pub rules: RulesConfig,

    /// Profile and habit database
    #[serde(default)]
    pub store: StoreConfig,

    /// Streak/points ledger switches
    #[serde(default)]
    pub ledger: LedgerSettings,
}

/// Rule base location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// YAML or TOML rule file. When unset the embedded table is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Database location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite file. Defaults to `~/.habitcore/habitcore.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// The rule source this config points at
    pub fn rule_source(&self) -> Box<dyn RuleSource> {
        match &self.rules.path {
            Some(path) => Box::new(FileRuleSource::new(path)),
            None => Box::new(EmbeddedRuleSource),
        }
    }

    /// Resolved database path
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("habitcore.db"))
    }

    /// Resolve relative paths against the directory holding the config file
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.rules.path, &mut self.store.path].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
