//! Command-line interface for planning and checking carpool trips.
//!
//! Every subcommand reads a JSON dataset of riders, vehicles and trips and
//! prints its result as pretty JSON. Options layer CLI flags over
//! `CARPOOL_*` environment variables and configuration files.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod dataset;
mod error;
mod plan;
mod validate;

pub use error::CliError;

use plan::{CompareArgs, PlanArgs, ReplanArgs};
use validate::{StatsArgs, ValidateArgs};

const ARG_DATASET: &str = "dataset";
const ARG_VEHICLE: &str = "vehicle";
const ARG_RIDER: &str = "rider";
const ARG_TRIP: &str = "trip";
const ARG_ALGORITHM: &str = "algorithm";
const ARG_SEED: &str = "seed";
const ENV_PLAN_DATASET: &str = "CARPOOL_CMDS_PLAN_DATASET";
const ENV_PLAN_VEHICLE: &str = "CARPOOL_CMDS_PLAN_VEHICLE";
const ENV_REPLAN_DATASET: &str = "CARPOOL_CMDS_REPLAN_DATASET";
const ENV_REPLAN_TRIP: &str = "CARPOOL_CMDS_REPLAN_TRIP";
const ENV_COMPARE_DATASET: &str = "CARPOOL_CMDS_COMPARE_DATASET";
const ENV_COMPARE_VEHICLE: &str = "CARPOOL_CMDS_COMPARE_VEHICLE";
const ENV_VALIDATE_DATASET: &str = "CARPOOL_CMDS_VALIDATE_DATASET";
const ENV_VALIDATE_TRIP: &str = "CARPOOL_CMDS_VALIDATE_TRIP";
const ENV_STATS_DATASET: &str = "CARPOOL_CMDS_STATS_DATASET";

/// Run the carpool CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments are invalid, the dataset cannot be
/// read, planning fails or the output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Plan(args) => plan::run_plan_with(args, writer),
        Command::Replan(args) => plan::run_replan_with(args, writer),
        Command::Compare(args) => plan::run_compare_with(args, writer),
        Command::Validate(args) => validate::run_validate_with(args, writer),
        Command::Stats(args) => validate::run_stats_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "carpool",
    about = "Optimise carpool pickup orders and detect trip conflicts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimise and store a new trip.
    Plan(PlanArgs),
    /// Re-optimise a stored trip.
    Replan(ReplanArgs),
    /// Compare both heuristics on the same riders.
    Compare(CompareArgs),
    /// Detect conflicts in a stored trip.
    Validate(ValidateArgs),
    /// Summarise every stored trip.
    Stats(StatsArgs),
}

#[cfg(test)]
mod tests;
