//! WardSafe clinic reference runtime demo CLI.
//!
//! Runs the reference scenarios, or one of the calculators directly.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- adverse-events --rules ./my-rules.toml
//!   cargo run -p demo -- slots --doctor D1 --date 2025-04-11
//!   cargo run -p demo -- bmi --weight 70 --height 175
//!   cargo run -p demo -- questionnaire --answers 1,0,2,1,0,0,1,2,0,0

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wardsafe_assess::{assess_bmi, score_questionnaire};
use wardsafe_contracts::error::{WardError, WardResult};
use wardsafe_ref_clinic::scenarios::{adverse_events, assessments, booking};
use wardsafe_rules::RuleTable;
use wardsafe_schedule::SlotGrid;

// ── CLI definition ────────────────────────────────────────────────────────────

/// WardSafe: adverse drug event alerts and appointment booking demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "WardSafe clinic reference runtime demo",
    long_about = "Runs WardSafe demo scenarios over fictional ward data: adverse event\n\
                  detection, appointment booking and self-assessment calculators."
)]
struct Cli {
    /// Rule table TOML to use instead of the built-in table.
    #[arg(long, global = true, value_name = "PATH")]
    rules: Option<PathBuf>,

    /// Schedule TOML with a `[schedule]` table to use instead of 09:00-17:00/30.
    #[arg(long, global = true, value_name = "PATH")]
    schedule: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: scan the mock ward for drug interactions and reactions.
    AdverseEvents,
    /// Scenario 2: book, contend for and cancel appointments.
    Booking,
    /// Scenario 3: BMI and questionnaire samples.
    Assessments,
    /// Print a doctor's open slots on the mock calendar as JSON.
    Slots {
        #[arg(long)]
        doctor: String,
        /// Day to list, YYYY-MM-DD.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Compute BMI and the ideal weight range as JSON.
    Bmi {
        /// Weight in kilograms.
        #[arg(long)]
        weight: f64,
        /// Height in centimetres.
        #[arg(long)]
        height: f64,
    },
    /// Score a completed ten-item questionnaire as JSON.
    Questionnaire {
        /// Ten comma-separated answers, each 0-3.
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        answers: Vec<u8>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = load_grid(cli.schedule.as_deref()).and_then(|grid| match cli.command {
        Command::RunAll => with_banner(|| run_all(cli.rules.as_deref(), grid)),
        Command::AdverseEvents => with_banner(|| run_adverse_events(cli.rules.as_deref())),
        Command::Booking => with_banner(|| booking::run_scenario(grid)),
        Command::Assessments => with_banner(assessments::run_scenario),
        Command::Slots { doctor, date } => run_slots(grid, &doctor, date),
        Command::Bmi { weight, height } => assess_bmi(weight, height).and_then(|r| print_json(&r)),
        Command::Questionnaire { answers } => {
            score_questionnaire(&answers).and_then(|r| print_json(&r))
        }
    });

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

fn with_banner(run: impl FnOnce() -> WardResult<()>) -> WardResult<()> {
    print_banner();
    run()?;
    println!("All selected scenarios completed successfully.");
    Ok(())
}

fn run_all(rules: Option<&Path>, grid: SlotGrid) -> WardResult<()> {
    run_adverse_events(rules)?;
    booking::run_scenario(grid)?;
    assessments::run_scenario()?;
    Ok(())
}

fn load_rules(rules: Option<&Path>) -> WardResult<Arc<RuleTable>> {
    let table = match rules {
        Some(path) => {
            info!(path = %path.display(), "loading rule table override");
            RuleTable::from_file(path)?
        }
        None => RuleTable::builtin()?,
    };
    Ok(Arc::new(table))
}

fn load_grid(schedule: Option<&Path>) -> WardResult<SlotGrid> {
    match schedule {
        Some(path) => {
            info!(path = %path.display(), "loading schedule override");
            SlotGrid::from_file(path)
        }
        None => Ok(SlotGrid::default()),
    }
}

fn run_adverse_events(rules: Option<&Path>) -> WardResult<()> {
    adverse_events::run_scenario(load_rules(rules)?)
}

fn run_slots(grid: SlotGrid, doctor: &str, date: Option<NaiveDate>) -> WardResult<()> {
    let service = booking::clinic_service(grid)?;
    let labels: Vec<String> = service
        .available_slots(doctor, date)?
        .iter()
        .map(|slot| slot.label())
        .collect();
    print_json(&labels)
}

fn print_json(value: &impl Serialize) -> WardResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| WardError::SerializationFailed {
        reason: format!("failed to render JSON output: {}", e),
    })?;
    println!("{}", json);
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("WardSafe: Ward Safety and Clinic Scheduling");
    println!("Clinic Reference Demo");
    println!("==========================================");
    println!();
    println!("Components exercised:");
    println!("  [1] Rule table: drug-drug interaction and drug-symptom reaction rules");
    println!("  [2] Adverse event monitor: active medications only, alerts to a sink");
    println!("  [3] Slot allocator: 09:00-17:00 grid minus scheduled appointments");
    println!("  [4] Booking service: atomic insert-if-free, role-scoped listing");
    println!("  [5] Calculators: BMI bands and questionnaire severity");
    println!();
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    // ── 1. JSON output ────────────────────────────────────────────────────────

    #[test]
    fn test_print_json_renders_plain_values() {
        print_json(&vec!["09:00", "09:30"]).unwrap();
    }

    #[test]
    fn test_print_json_reports_unrenderable_values() {
        // JSON object keys must be strings.
        let mut value = BTreeMap::new();
        value.insert(vec![1u8, 2], "slot");

        match print_json(&value) {
            Err(WardError::SerializationFailed { reason }) => {
                assert!(reason.contains("failed to render JSON output"), "got: {reason}")
            }
            other => panic!("expected SerializationFailed, got {:?}", other),
        }
    }

    // ── 2. schedule override ──────────────────────────────────────────────────

    #[test]
    fn test_load_grid_defaults_without_override() {
        assert_eq!(load_grid(None).unwrap(), SlotGrid::default());
    }

    #[test]
    fn test_load_grid_reports_missing_file() {
        let result = load_grid(Some(Path::new("/nonexistent/schedule.toml")));
        assert!(matches!(result, Err(WardError::ConfigError { .. })));
    }

    #[test]
    fn test_slots_follow_the_loaded_grid() {
        let grid = SlotGrid::from_toml_str(
            "[schedule]\nstart = \"09:00\"\nend = \"10:00\"\ninterval_minutes = 15",
        )
        .unwrap();
        run_slots(grid, "D1", Some(wardsafe_ref_clinic::mock_data::clinic_day())).unwrap();
        assert!(matches!(run_slots(grid, "D1", None), Err(WardError::MissingField { .. })));
    }
}
