use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use liftplan_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(about = "Progressive overload schedule generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a day-by-day schedule (default)
    Generate {
        /// Exercise definitions JSON
        #[arg(long, requires = "routine")]
        exercises: Option<PathBuf>,

        /// Routine JSON listing the workout cycle
        #[arg(long, requires = "startpoints")]
        routine: Option<PathBuf>,

        /// Starting weights JSON
        #[arg(long, requires = "exercises")]
        startpoints: Option<PathBuf>,

        /// Where to write the schedule (prints a preview when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Number of days to simulate
        #[arg(long)]
        days: Option<u32>,

        /// Minimum acceptable average daily growth of weighted volume
        #[arg(long)]
        slope: Option<f64>,

        /// Output format (json, csv)
        #[arg(long)]
        format: Option<String>,

        /// Keep the partial schedule when progression stalls
        #[arg(long)]
        allow_partial: bool,

        /// Calendar date of day 1 (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },

    /// Validate the catalog and routine without simulating
    Check {
        /// Exercise definitions JSON
        #[arg(long, requires = "routine")]
        exercises: Option<PathBuf>,

        /// Routine JSON listing the workout cycle
        #[arg(long, requires = "startpoints")]
        routine: Option<PathBuf>,

        /// Starting weights JSON
        #[arg(long, requires = "exercises")]
        startpoints: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    liftplan_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Generate {
            exercises,
            routine,
            startpoints,
            output,
            days,
            slope,
            format,
            allow_partial,
            start_date,
        }) => cmd_generate(
            load_inputs(exercises, startpoints, routine)?,
            output,
            days,
            slope,
            format,
            allow_partial,
            start_date,
            &config,
        ),
        Some(Commands::Check {
            exercises,
            routine,
            startpoints,
        }) => cmd_check(exercises, startpoints, routine),
        None => {
            // Default to "generate" with the built-in catalog
            cmd_generate(
                load_inputs(None, None, None)?,
                None,
                None,
                None,
                None,
                false,
                None,
                &config,
            )
        }
    }
}

/// Resolve the three input files, or fall back to the built-in demo plan.
fn load_inputs(
    exercises: Option<PathBuf>,
    startpoints: Option<PathBuf>,
    routine: Option<PathBuf>,
) -> Result<(Catalog, Routine)> {
    match (exercises, startpoints, routine) {
        (Some(e), Some(s), Some(r)) => load_plan(&e, &s, &r),
        (None, None, None) => Ok((builtin_catalog().clone(), builtin_routine().clone())),
        _ => Err(Error::Config(
            "provide --exercises, --startpoints, and --routine together".into(),
        )),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    plan: (Catalog, Routine),
    output: Option<PathBuf>,
    days: Option<u32>,
    slope: Option<f64>,
    format: Option<String>,
    allow_partial: bool,
    start_date: Option<NaiveDate>,
    config: &Config,
) -> Result<()> {
    let (catalog, routine) = plan;

    let params = ScheduleParams {
        days: days.unwrap_or(config.simulation.days),
        volume_slope: slope.unwrap_or(config.simulation.volume_slope),
        advance_cap: config.simulation.advance_cap,
        allow_partial,
        start_date: start_date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
    };

    let schedule = generate_schedule(&catalog, &routine, &params)?;

    if let Some(ref stall) = schedule.meta.stalled {
        match stall.exercise {
            Some(ref exercise) => eprintln!(
                "⚠ progression stalled on day {}: exercise '{}' ran out of weight steps",
                stall.day, exercise
            ),
            None => eprintln!(
                "⚠ progression stalled on day {} (workout {}) after {} attempts",
                stall.day, stall.workout, stall.attempts
            ),
        }
    }

    match output {
        Some(path) => {
            let format = match format {
                Some(ref name) => name.parse()?,
                None => config.output.format,
            };
            match format {
                OutputFormat::Json => liftplan_core::export::write_json(&schedule, &path)?,
                OutputFormat::Csv => liftplan_core::export::write_csv(&schedule, &path)?,
            }
            println!("✓ Wrote {} day(s) to {}", schedule.days.len(), path.display());
        }
        None => display_schedule(&schedule),
    }

    Ok(())
}

fn cmd_check(
    exercises: Option<PathBuf>,
    startpoints: Option<PathBuf>,
    routine: Option<PathBuf>,
) -> Result<()> {
    match load_inputs(exercises, startpoints, routine) {
        Ok((catalog, routine)) => {
            println!(
                "✓ Plan OK: {} exercise(s), cycle of {} workout(s)",
                catalog.exercises.len(),
                routine.workouts.len()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Plan validation failed: {}", e);
            Err(e)
        }
    }
}

fn display_schedule(schedule: &Schedule) {
    const PREVIEW_DAYS: usize = 12;

    println!("╭─────────────────────────────────────────╮");
    println!("│  LIFTPLAN SCHEDULE                      │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {} day(s), slope target {}",
        schedule.days.len(),
        schedule.meta.volume_slope
    );
    println!();

    for day in schedule.days.iter().take(PREVIEW_DAYS) {
        println!(
            "Day {:>3} ({})  workout {}  volume {:.1}",
            day.day, day.date, day.workout, day.total_volume
        );
        for (i, name) in day.exercises.iter().enumerate() {
            println!(
                "    {}: {} sets x {} reps @ {:.1}",
                name, day.sets[i], day.reps[i], day.weights[i]
            );
        }
    }

    if schedule.days.len() > PREVIEW_DAYS {
        println!(
            "  … {} more day(s); use --output to capture the full schedule",
            schedule.days.len() - PREVIEW_DAYS
        );
    }
}
