// ABOUTME: FitEvolution CLI for catalog seeding, profiles, training plans and workout logs
// ABOUTME: Prints JSON on stdout; logs and errors go to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution
//!
//! Usage:
//! ```bash
//! # Load the built-in exercise catalog
//! fitevolution-cli catalog seed
//!
//! # Save a profile
//! fitevolution-cli --user 5b0c... profile set --age 30 --sex M --weight-kg 80 \
//!     --height-cm 180 --activity-level moderate --goal hypertrophy
//!
//! # Preview a generated week
//! fitevolution-cli --user 5b0c... plan generate --days 4
//!
//! # Generate and store an active 8 week plan
//! fitevolution-cli --user 5b0c... plan generate --save --name "Spring block" --weeks 8
//!
//! # Log a performed set
//! fitevolution-cli --user 5b0c... log add --day-exercise 12 --set 1 --reps 10 --rpe 8
//! ```

mod commands;
mod helpers;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use fitevolution::config::AppConfig;
use fitevolution::database::Database;
use fitevolution::errors::{AppError, AppResult};
use fitevolution::logging;
use fitevolution::services::PlanService;
use std::process::ExitCode;
use tracing::debug;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "fitevolution-cli",
    about = "FitEvolution training planner",
    long_about = "Generate weekly resistance training plans, manage plan status and record workout history."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// User the command acts on
    #[arg(long, global = true)]
    user: Option<Uuid>,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Exercise catalog commands
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },

    /// Profile commands
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Training plan commands
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },

    /// Workout history commands
    Log {
        #[command(subcommand)]
        action: LogCommand,
    },

    /// Daily macronutrient targets
    Macros {
        /// Training days per week (activity default if omitted)
        #[arg(long)]
        days: Option<u8>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum CatalogCommand {
    /// Insert the built-in catalog (idempotent)
    Seed,
    /// Show stored muscle groups and exercises
    List,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ProfileCommand {
    /// Create or replace the profile
    Set {
        /// Age in years
        #[arg(long)]
        age: u32,
        /// Sex, M or F
        #[arg(long)]
        sex: String,
        /// Body weight in kilograms
        #[arg(long)]
        weight_kg: f64,
        /// Height in centimeters
        #[arg(long)]
        height_cm: u32,
        /// sedentary, light, moderate or intense
        #[arg(long, default_value = "moderate")]
        activity_level: String,
        /// fat_loss, recomposition or hypertrophy
        #[arg(long, default_value = "hypertrophy")]
        goal: String,
        /// Typical session length in minutes
        #[arg(long)]
        session_minutes: Option<u32>,
    },
    /// Show the saved profile
    Show,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum PlanCommand {
    /// Generate a weekly plan, optionally storing it as the active plan
    Generate {
        /// Training days per week
        #[arg(long)]
        days: Option<u8>,
        /// Store the plan and make it active
        #[arg(long)]
        save: bool,
        /// Plan name when saving
        #[arg(long, requires = "save")]
        name: Option<String>,
        /// Plan length in weeks when saving
        #[arg(long, default_value = "4")]
        weeks: u32,
        /// First day when saving (today if omitted)
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// List the user's plans, newest first
    List,
    /// Show a plan with its days and exercises
    Show {
        /// Plan id
        plan_id: Uuid,
    },
    /// Make a plan active, pausing the current one
    Activate {
        /// Plan id
        plan_id: Uuid,
    },
    /// Pause an active plan
    Pause {
        /// Plan id
        plan_id: Uuid,
    },
    /// Mark a plan completed
    Complete {
        /// Plan id
        plan_id: Uuid,
    },
    /// Add a training day to a plan
    AddDay {
        /// Plan id
        plan_id: Uuid,
        /// Weekday number, 1 (Monday) to 7
        #[arg(long)]
        weekday: u8,
        /// Day name
        #[arg(long)]
        name: String,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Schedule an exercise on a training day
    AddExercise {
        /// Training day id
        day_id: i64,
        /// Catalog exercise id
        #[arg(long)]
        exercise: i64,
        /// Position in the day (next free slot if omitted)
        #[arg(long)]
        order: Option<u32>,
        /// Number of sets
        #[arg(long, default_value = "3")]
        sets: u8,
        /// Rep prescription, e.g. "8-12"
        #[arg(long, default_value = "8-12")]
        reps: String,
        /// Suggested load in kilograms
        #[arg(long)]
        weight_kg: Option<f64>,
        /// Rest between sets in minutes
        #[arg(long, default_value = "1.5")]
        rest_minutes: f64,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum LogCommand {
    /// Record a performed set
    Add {
        /// Scheduled day exercise id
        #[arg(long)]
        day_exercise: i64,
        /// Set number, from 1
        #[arg(long)]
        set: u8,
        /// Repetitions performed
        #[arg(long)]
        reps: u32,
        /// Load used in kilograms
        #[arg(long)]
        weight_kg: Option<f64>,
        /// Rate of perceived exertion, 1 to 10
        #[arg(long)]
        rpe: u8,
        /// Discomfort, 0 to 10
        #[arg(long, default_value = "0")]
        discomfort: u8,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show recent logs
    List {
        /// Only logs for this day exercise
        #[arg(long)]
        day_exercise: Option<i64>,
        /// Maximum number of logs
        #[arg(long, default_value = "50")]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = logging::init_from_env() {
        eprintln!("Failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            helpers::output::print_error(error);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }

    let database = Database::new(&config.database_url, config.order_retry_attempts).await?;
    let service = PlanService::from_config(database.clone(), &config)?;
    let expired = database
        .complete_expired_plans(Local::now().date_naive())
        .await?;
    debug!(expired, "Expired plans completed");

    let result = dispatch(cli.command, cli.user, &service).await;
    database.close().await;
    result
}

async fn dispatch(command: Command, user: Option<Uuid>, service: &PlanService) -> AppResult<()> {
    let database = service.database();
    match command {
        Command::Catalog { action } => match action {
            CatalogCommand::Seed => commands::catalog::seed(database).await,
            CatalogCommand::List => commands::catalog::list(database).await,
        },
        Command::Profile { action } => {
            let user_id = require_user(user)?;
            match action {
                ProfileCommand::Set {
                    age,
                    sex,
                    weight_kg,
                    height_cm,
                    activity_level,
                    goal,
                    session_minutes,
                } => {
                    let input = commands::profile::ProfileArgs {
                        age,
                        sex,
                        weight_kg,
                        height_cm,
                        activity_level,
                        goal,
                        session_minutes,
                    };
                    commands::profile::set(database, user_id, input).await
                }
                ProfileCommand::Show => commands::profile::show(database, user_id).await,
            }
        }
        Command::Plan { action } => dispatch_plan(action, user, service).await,
        Command::Log { action } => {
            let user_id = require_user(user)?;
            match action {
                LogCommand::Add {
                    day_exercise,
                    set,
                    reps,
                    weight_kg,
                    rpe,
                    discomfort,
                    notes,
                } => {
                    let entry = commands::log::LogArgs {
                        day_exercise_id: day_exercise,
                        set_number: set,
                        reps_done: reps,
                        weight_used_kg: weight_kg,
                        rpe,
                        discomfort,
                        notes,
                    };
                    commands::log::add(database, user_id, entry).await
                }
                LogCommand::List {
                    day_exercise,
                    limit,
                } => commands::log::list(database, user_id, day_exercise, limit).await,
            }
        }
        Command::Macros { days } => {
            let user_id = require_user(user)?;
            commands::macros::show(service, user_id, days).await
        }
    }
}

async fn dispatch_plan(action: PlanCommand, user: Option<Uuid>, service: &PlanService) -> AppResult<()> {
    let database = service.database();
    match action {
        PlanCommand::Generate {
            days,
            save,
            name,
            weeks,
            start,
        } => {
            let user_id = require_user(user)?;
            if save {
                let options = commands::plan::SaveOptions {
                    name,
                    weeks,
                    start,
                };
                commands::plan::generate_and_save(service, user_id, days, options).await
            } else {
                commands::plan::generate(service, user_id, days).await
            }
        }
        PlanCommand::List => commands::plan::list(database, require_user(user)?).await,
        PlanCommand::Show { plan_id } => commands::plan::show(database, plan_id).await,
        PlanCommand::Activate { plan_id } => commands::plan::activate(database, plan_id).await,
        PlanCommand::Pause { plan_id } => commands::plan::pause(database, plan_id).await,
        PlanCommand::Complete { plan_id } => commands::plan::complete(database, plan_id).await,
        PlanCommand::AddDay {
            plan_id,
            weekday,
            name,
            notes,
        } => commands::plan::add_day(database, plan_id, weekday, name, notes).await,
        PlanCommand::AddExercise {
            day_id,
            exercise,
            order,
            sets,
            reps,
            weight_kg,
            rest_minutes,
        } => {
            let entry = commands::plan::ExerciseArgs {
                exercise_id: exercise,
                order,
                sets,
                reps,
                suggested_weight_kg: weight_kg,
                rest_minutes,
            };
            commands::plan::add_exercise(database, day_id, entry).await
        }
    }
}

fn require_user(user: Option<Uuid>) -> AppResult<Uuid> {
    user.ok_or_else(|| AppError::invalid_input("This command needs --user <UUID>"))
}
