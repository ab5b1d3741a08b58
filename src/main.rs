use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod cli;
mod commands;

use commands::{Commands, HabitCommands, ProfileCommands, RulesCommands};

#[derive(Parser)]
#[command(name = "habitcore")]
#[command(about = "Points, streaks and levels for habit tracking")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.habitcore/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init { force } => {
            cli::init::init_command(cli.config.clone(), force)?;
        }
        Commands::Rules { command } => match command {
            RulesCommands::Suggest {
                category,
                difficulty,
                json,
            } => cli::rules::suggest_command(config, category, difficulty, json)?,
            RulesCommands::Level { points } => cli::rules::level_command(config, points)?,
            RulesCommands::Bonus { streak } => cli::rules::bonus_command(config, streak)?,
            RulesCommands::Consistent { streak } => cli::rules::consistent_command(config, streak)?,
            RulesCommands::Actions => cli::rules::actions_command(config)?,
        },
        Commands::Profile { command } => match command {
            ProfileCommands::Create { user } => cli::profile::create_command(config, user)?,
            ProfileCommands::Show { user, json } => cli::profile::show_command(config, user, json)?,
            ProfileCommands::Ranking { limit, json } => {
                cli::profile::ranking_command(config, limit, json)?
            }
        },
        Commands::Habit { command } => match command {
            HabitCommands::Add {
                user,
                name,
                points,
                category,
                date,
            } => {
                let args = cli::habit::AddArgs {
                    user,
                    name,
                    points,
                    category,
                    date,
                };
                cli::habit::add_command(config, args)?
            }
            HabitCommands::Complete { habit, today, json } => {
                cli::habit::complete_command(config, habit, today, json)?
            }
            HabitCommands::Uncomplete { habit, today, json } => {
                cli::habit::uncomplete_command(config, habit, today, json)?
            }
            HabitCommands::List { user, json } => cli::habit::list_command(config, user, json)?,
        },
    }

    Ok(())
}
