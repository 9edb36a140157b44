use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use habit_core::*;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status for operations on a habit that does not exist
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser)]
#[command(name = "habit")]
#[command(about = "Habit tracker with daily check-ins and streaks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new habit
    Add {
        #[arg(long)]
        name: String,

        /// Free-text frequency label
        #[arg(long, default_value = "daily")]
        frequency: String,

        #[arg(long, default_value = "learning")]
        category: String,

        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },

    /// List habits
    List {
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Maximum habits to return (defaults to listing.default_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one habit with its check-ins
    Show { id: HabitId },

    /// Replace every field of a habit
    Update {
        id: HabitId,

        #[arg(long)]
        name: String,

        #[arg(long)]
        frequency: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        start_date: NaiveDate,
    },

    /// Delete a habit and all of its check-ins
    Delete { id: HabitId },

    /// Record a check-in for a habit
    CheckIn {
        id: HabitId,

        /// Check-in date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Show the current streak for a habit
    Streak { id: HabitId },

    /// Show streak, total check-ins and today's status for a habit
    Summary { id: HabitId },

    /// Export all check-ins to CSV
    Export {
        /// Output file (defaults to <data-dir>/check_ins.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    habit_core::logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let detail = ErrorDetail {
                detail: e.to_string(),
            };
            eprintln!(
                "{}",
                serde_json::to_string(&detail).unwrap_or_else(|_| detail.detail.clone())
            );

            if e.is_not_found() {
                ExitCode::from(EXIT_NOT_FOUND)
            } else {
                tracing::error!("Command failed: {}", e);
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    let store = FileStore::open(config.store_path())?;
    let habits = HabitRepository::new(&store);
    let streaks = StreakEngine::new(&store);

    match cli.command {
        Commands::Add {
            name,
            frequency,
            category,
            start_date,
        } => {
            let fields =
                HabitFields::new(name, frequency, category, start_date.unwrap_or_else(today));
            print_json(&habits.create_habit(fields)?)
        }
        Commands::List { skip, limit } => {
            let query = ListQuery {
                skip,
                limit: limit.unwrap_or(config.listing.default_limit),
            };
            print_json(&habits.list_habits(query)?)
        }
        Commands::Show { id } => print_json(&habits.get_habit(id)?),
        Commands::Update {
            id,
            name,
            frequency,
            category,
            start_date,
        } => {
            let fields = HabitFields::new(name, frequency, category, start_date);
            print_json(&habits.update_habit(id, fields)?)
        }
        Commands::Delete { id } => {
            habits.delete_habit(id)?;
            print_json(&StatusResponse {
                message: format!("Habit {} deleted", id),
            })
        }
        Commands::CheckIn { id, date, notes } => {
            let fields = CheckInFields::new(date.unwrap_or_else(today), notes);
            print_json(&habits.create_check_in(id, fields)?)
        }
        Commands::Streak { id } => print_json(&streaks.report(id)?),
        Commands::Summary { id } => print_json(&streaks.summary(id)?),
        Commands::Export { output } => {
            let dest = output.unwrap_or_else(|| config.data.data_dir.join("check_ins.csv"));
            let count = export_check_ins(&store, &dest)?;
            print_json(&StatusResponse {
                message: format!("Exported {} check-ins to {}", count, dest.display()),
            })
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
