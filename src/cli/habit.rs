//! Habit commands

use anyhow::Result;
use chrono::NaiveDate;
use std::path::Path;

use habitcore::ledger::StreakChange;
use habitcore::store::{NewHabit, SqliteStore};
use habitcore::{HabitId, HabitStatus, TransitionEdge, TransitionReport, UserId};

use super::{day_or_today, load_config, open_engine};

/// Arguments for `habit add`
pub struct AddArgs {
    pub user: UserId,
    pub name: String,
    pub points: u32,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

pub fn add_command(config_path: Option<&Path>, args: AddArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let engine = open_engine(&config)?;

    let (habit, _) = engine.add_habit(
        args.user,
        &NewHabit {
            name: args.name,
            points: args.points,
            category: args.category,
            date: day_or_today(args.date),
        },
    )?;

    println!(
        "Habit #{} added for user {}: {} ({} points, {})",
        habit.id, args.user, habit.name, habit.points, habit.date
    );
    Ok(())
}

pub fn complete_command(
    config_path: Option<&Path>,
    habit: HabitId,
    today: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    set_status(config_path, habit, HabitStatus::Completed, today, json)
}

pub fn uncomplete_command(
    config_path: Option<&Path>,
    habit: HabitId,
    today: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    set_status(config_path, habit, HabitStatus::Pending, today, json)
}

fn set_status(
    config_path: Option<&Path>,
    id: HabitId,
    status: HabitStatus,
    today: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let engine = open_engine(&config)?;
    let report = engine.set_habit_status(id, status, day_or_today(today))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(id, &report);
    }
    Ok(())
}

fn print_report(id: HabitId, report: &TransitionReport) {
    let p = &report.profile;
    match report.edge {
        TransitionEdge::Unchanged => {
            println!("Habit #{} already had that status, nothing changed.", id);
            return;
        }
        TransitionEdge::Complete => {
            println!("Habit #{} completed: {:+} points", id, report.points_delta);
            if report.bonus_awarded > 0 {
                println!("  Streak bonus: +{}", report.bonus_awarded);
            }
        }
        TransitionEdge::Undo => {
            println!("Habit #{} undone: {:+} points", id, report.points_delta);
        }
    }

    let streak_note = match report.streak_change {
        StreakChange::Extended => " (extended)",
        StreakChange::Restarted => " (restarted)",
        StreakChange::Kept => "",
    };
    println!("  Total: {} points", p.points_total);
    println!("  Streak: {} days{} (max: {})", p.streak_current, streak_note, p.streak_max);

    for a in &report.new_achievements {
        println!("  Achievement unlocked: {} (+{})", a.name, a.points_bonus);
    }
}

pub fn list_command(config_path: Option<&Path>, user: UserId, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let store = SqliteStore::open(&config.store_path())?;
    let habits = store.habits_for(user)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&habits)?);
        return Ok(());
    }

    if habits.is_empty() {
        println!("No habits found.");
        return Ok(());
    }

    println!("Habits ({}):\n", habits.len());
    for h in &habits {
        println!(
            "  #{} [{}] {} {} - {} points{}",
            h.id,
            h.status,
            h.date,
            h.name,
            h.points,
            h.category
                .as_deref()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default()
        );
    }
    Ok(())
}
