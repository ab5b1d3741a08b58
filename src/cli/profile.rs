//! Profile commands

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use habitcore::achievements::{Achievement, ACHIEVEMENTS};
use habitcore::rules::LevelLabel;
use habitcore::store::SqliteStore;
use habitcore::{Profile, UserId};

use super::{load_config, load_evaluator, open_engine};

#[derive(Serialize)]
struct RankingEntry {
    rank: usize,
    #[serde(flatten)]
    profile: Profile,
    level: LevelLabel,
}

pub fn create_command(config_path: Option<&Path>, user: UserId) -> Result<()> {
    let config = load_config(config_path)?;
    let store = SqliteStore::open(&config.store_path())?;
    let profile = store.create_profile(user)?;
    println!(
        "Profile {}: {} points, streak {}",
        profile.user_id, profile.points_total, profile.streak_current
    );
    Ok(())
}

pub fn show_command(config_path: Option<&Path>, user: UserId, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let engine = open_engine(&config)?;
    let summary = engine.profile_summary(user)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let p = &summary.profile;
    println!("User {}", p.user_id);
    println!("  Level:      {}", summary.level);
    println!("  Points:     {}", p.points_total);
    println!(
        "  Streak:     {} days (max: {}){}",
        p.streak_current,
        p.streak_max,
        if summary.consistent { ", consistent" } else { "" }
    );
    println!("  Next bonus: {}", summary.next_bonus);
    println!("  Completed:  {}", p.habits_completed);
    println!("  Created:    {}", p.habits_created);

    let unlocked = engine.achievements_for(user)?;
    if !unlocked.is_empty() {
        println!("  Achievements:");
        for a in &unlocked {
            println!("    {} - {} (+{})", a.name, a.description, a.points_bonus);
        }
    }

    let locked: Vec<&Achievement> = ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked.iter().any(|u| u.id == a.id))
        .collect();
    if !locked.is_empty() {
        println!("  In progress:");
        for a in locked {
            let (value, target) = a.requirement.progress(p);
            println!("    {} - {} ({}/{})", a.name, a.description, value, target);
        }
    }
    Ok(())
}

pub fn ranking_command(config_path: Option<&Path>, limit: usize, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let store = SqliteStore::open(&config.store_path())?;
    let evaluator = load_evaluator(&config);

    let entries: Vec<RankingEntry> = store
        .ranking(limit)?
        .into_iter()
        .enumerate()
        .map(|(i, profile)| RankingEntry {
            rank: i + 1,
            level: evaluator.level_for_points(profile.points_total),
            profile,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }

    for e in &entries {
        println!(
            "  {:>3}. user {:<8} {:>7} points  {:<12} streak {}",
            e.rank, e.profile.user_id, e.profile.points_total, e.level.as_str(), e.profile.streak_current
        );
    }
    Ok(())
}
