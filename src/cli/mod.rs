//! CLI command implementations

pub mod habit;
pub mod init;
pub mod profile;
pub mod rules;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use habitcore::config::Config;
use habitcore::rules::RuleEvaluator;
use habitcore::store::SqliteStore;
use habitcore::Gamification;

/// The facade as the CLI wires it: one SQLite store behind both seams
pub type Engine = Gamification<SqliteStore, SqliteStore>;

/// Load the config given with `--config`, or the global one
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    Config::load_from(config_path)
}

pub fn load_evaluator(config: &Config) -> RuleEvaluator {
    RuleEvaluator::load(config.rule_source().as_ref())
}

/// Open the database and build the facade on top of it
pub fn open_engine(config: &Config) -> Result<Engine> {
    let path = config.store_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("Failed to open database: {}", path.display()))?;
    let engine = Gamification::new(
        store.clone(),
        store,
        load_evaluator(config),
        config.ledger,
    );
    Ok(engine)
}

/// `--today` / `--date` value, or the local calendar day
pub fn day_or_today(day: Option<NaiveDate>) -> NaiveDate {
    day.unwrap_or_else(|| Local::now().date_naive())
}
