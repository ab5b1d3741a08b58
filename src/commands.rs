//! CLI command definitions for habitcore.

use chrono::NaiveDate;
use clap::Subcommand;

use habitcore::{HabitId, UserId};

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new ~/.habitcore/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Query the rule base
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },

    /// Create and inspect user profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Add habits and check them off
    Habit {
        #[command(subcommand)]
        command: HabitCommands,
    },
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// Suggest habits for a category or a difficulty
    Suggest {
        /// Category label, e.g. "Health"
        #[arg(long, conflicts_with = "difficulty", required_unless_present = "difficulty")]
        category: Option<String>,
        /// Difficulty label, e.g. "Easy"
        #[arg(long)]
        difficulty: Option<String>,
        /// Print JSON instead of plain lines
        #[arg(long)]
        json: bool,
    },
    /// Level label for a points total
    Level { points: u32 },
    /// Bonus points for a streak length
    Bonus { streak: u32 },
    /// Whether a streak length counts as consistent
    Consistent { streak: u32 },
    /// List the queries the rule base answers
    Actions,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Create an empty profile (no-op if it exists)
    Create { user: UserId },
    /// Show counters, level and achievements
    Show {
        user: UserId,
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// Profiles ordered by points
    Ranking {
        /// Limit number of results
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: usize,
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum HabitCommands {
    /// Add a pending habit for a user
    Add {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        name: String,
        /// Points granted on completion
        #[arg(long)]
        points: u32,
        #[arg(long)]
        category: Option<String>,
        /// Day the habit belongs to (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Mark a habit completed
    Complete {
        habit: HabitId,
        /// Day the completion happens on (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// Undo a completion
    Uncomplete {
        habit: HabitId,
        /// Day the undo happens on (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
    /// List a user's habits
    List {
        user: UserId,
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },
}
