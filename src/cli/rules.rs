//! Rule base queries

use anyhow::Result;
use std::path::Path;

use habitcore::rules::{RuleEvaluator, Suggestions};

use super::{load_config, load_evaluator};

/// Queries answered by the rule base, as listed by `rules actions`
const ACTIONS: &[(&str, &str)] = &[
    ("suggest --category <c>", "habits suggested for a category"),
    ("suggest --difficulty <d>", "habits suggested for a difficulty"),
    ("consistent <streak>", "whether a streak counts as consistent"),
    ("bonus <streak>", "bonus points earned by a streak"),
    ("level <points>", "level label for a points total"),
];

fn evaluator(config_path: Option<&Path>) -> Result<RuleEvaluator> {
    let config = load_config(config_path)?;
    Ok(load_evaluator(&config))
}

pub fn suggest_command(
    config_path: Option<&Path>,
    category: Option<String>,
    difficulty: Option<String>,
    json: bool,
) -> Result<()> {
    let evaluator = evaluator(config_path)?;
    let suggestions = match (category, difficulty) {
        (Some(category), _) => evaluator.suggest_habits_by_category(&category),
        (None, Some(difficulty)) => evaluator.suggest_habits_by_difficulty(&difficulty),
        (None, None) => anyhow::bail!("Pass --category or --difficulty"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    match &suggestions {
        Suggestions::Unavailable => eprintln!("Rule base unavailable"),
        s if s.is_empty() => println!("No suggestions."),
        s => {
            for name in s.names() {
                println!("{name}");
            }
        }
    }
    Ok(())
}

pub fn level_command(config_path: Option<&Path>, points: u32) -> Result<()> {
    let evaluator = evaluator(config_path)?;
    println!("{}", evaluator.level_for_points(points));
    Ok(())
}

pub fn bonus_command(config_path: Option<&Path>, streak: u32) -> Result<()> {
    let evaluator = evaluator(config_path)?;
    println!("{}", evaluator.bonus_for_streak(streak));
    Ok(())
}

pub fn consistent_command(config_path: Option<&Path>, streak: u32) -> Result<()> {
    let evaluator = evaluator(config_path)?;
    println!("{}", evaluator.is_streak_consistent(streak));
    Ok(())
}

pub fn actions_command(config_path: Option<&Path>) -> Result<()> {
    let evaluator = evaluator(config_path)?;
    match evaluator.rule_base() {
        Some(rules) => println!("Rule base loaded ({} facts)\n", rules.fact_count()),
        None => println!("Rule base unavailable, queries return defaults\n"),
    }

    for (usage, what) in ACTIONS {
        println!("  {usage:<26} {what}");
    }
    Ok(())
}
