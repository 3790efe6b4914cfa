//! `plan`, `replan` and `compare`: optimise pickup orders from a dataset.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use carpool_core::{GeoDistance, MemoryRepository, Trip};
use carpool_solver::{Algorithm, AlgorithmReport, AnnealingConfig, Comparison, TripPlanner};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, write_json};
use crate::{
    ARG_ALGORITHM, ARG_DATASET, ARG_RIDER, ARG_SEED, ARG_TRIP, ARG_VEHICLE, CliError,
    ENV_COMPARE_DATASET, ENV_COMPARE_VEHICLE, ENV_PLAN_DATASET, ENV_PLAN_VEHICLE,
    ENV_REPLAN_DATASET, ENV_REPLAN_TRIP,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the vehicle and riders from a JSON dataset, optimise \
                 the pickup order and print the resulting trip. Trips with \
                 capacity or availability conflicts are rejected.",
    about = "Optimise a pickup order for one vehicle"
)]
#[ortho_config(prefix = "CARPOOL")]
pub(crate) struct PlanArgs {
    /// Path to the JSON dataset.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Identifier of the vehicle to plan for.
    #[arg(long = ARG_VEHICLE, value_name = "id")]
    #[serde(default)]
    pub(crate) vehicle: Option<u64>,
    /// Rider to pick up; repeat for each rider.
    #[arg(long = ARG_RIDER, value_name = "id")]
    #[serde(default)]
    pub(crate) riders: Vec<u64>,
    /// Heuristic to use (`construction` or `improvement`).
    #[arg(long = ARG_ALGORITHM, value_name = "name")]
    #[serde(default)]
    pub(crate) algorithm: Option<String>,
    /// Seed for annealing moves and placeholder distances.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// CLI arguments for the `compare` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run nearest neighbour and simulated annealing on the same \
                 riders and report distance, duration, cost and runtime for \
                 each. Nothing is persisted.",
    about = "Compare both heuristics on one vehicle"
)]
#[ortho_config(prefix = "CARPOOL")]
pub(crate) struct CompareArgs {
    /// Path to the JSON dataset.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Identifier of the vehicle to plan for.
    #[arg(long = ARG_VEHICLE, value_name = "id")]
    #[serde(default)]
    pub(crate) vehicle: Option<u64>,
    /// Rider to pick up; repeat for each rider.
    #[arg(long = ARG_RIDER, value_name = "id")]
    #[serde(default)]
    pub(crate) riders: Vec<u64>,
    /// Seed for annealing moves and placeholder distances.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl CompareArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// CLI arguments for the `replan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Re-optimise the riders of a stored trip against its \
                 vehicle's current capacity and print the updated trip.",
    about = "Re-optimise a stored trip"
)]
#[ortho_config(prefix = "CARPOOL")]
pub(crate) struct ReplanArgs {
    /// Path to the JSON dataset.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Identifier of the stored trip.
    #[arg(long = ARG_TRIP, value_name = "id")]
    #[serde(default)]
    pub(crate) trip: Option<u64>,
    /// Heuristic to use (`construction` or `improvement`).
    #[arg(long = ARG_ALGORITHM, value_name = "name")]
    #[serde(default)]
    pub(crate) algorithm: Option<String>,
    /// Seed for annealing moves and placeholder distances.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl ReplanArgs {
    pub(crate) fn into_config(self) -> Result<ReplanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReplanConfig::try_from(merged)
    }
}

/// Resolved `plan`/`compare` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) vehicle: u64,
    pub(crate) riders: Vec<u64>,
    pub(crate) algorithm: Algorithm,
    pub(crate) seed: Option<u64>,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_PLAN_DATASET,
        })?;
        let vehicle = args.vehicle.ok_or(CliError::MissingArgument {
            field: ARG_VEHICLE,
            env: ENV_PLAN_VEHICLE,
        })?;
        Ok(Self {
            dataset,
            vehicle,
            riders: args.riders,
            algorithm: parse_algorithm(args.algorithm.as_deref())?,
            seed: args.seed,
        })
    }
}

impl TryFrom<CompareArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: CompareArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_COMPARE_DATASET,
        })?;
        let vehicle = args.vehicle.ok_or(CliError::MissingArgument {
            field: ARG_VEHICLE,
            env: ENV_COMPARE_VEHICLE,
        })?;
        Ok(Self {
            dataset,
            vehicle,
            riders: args.riders,
            algorithm: Algorithm::default(),
            seed: args.seed,
        })
    }
}

/// Resolved `replan` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReplanConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) trip: u64,
    pub(crate) algorithm: Algorithm,
    pub(crate) seed: Option<u64>,
}

impl TryFrom<ReplanArgs> for ReplanConfig {
    type Error = CliError;

    fn try_from(args: ReplanArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_REPLAN_DATASET,
        })?;
        let trip = args.trip.ok_or(CliError::MissingArgument {
            field: ARG_TRIP,
            env: ENV_REPLAN_TRIP,
        })?;
        Ok(Self {
            dataset,
            trip,
            algorithm: parse_algorithm(args.algorithm.as_deref())?,
            seed: args.seed,
        })
    }
}

fn parse_algorithm(name: Option<&str>) -> Result<Algorithm, CliError> {
    name.map_or_else(
        || Ok(Algorithm::default()),
        |value| value.parse().map_err(CliError::from),
    )
}

/// Build a planner over the dataset, seeding distances and annealing alike.
fn planner_for(
    dataset: &Utf8Path,
    seed: Option<u64>,
) -> Result<TripPlanner<MemoryRepository>, CliError> {
    let repository = Dataset::load(dataset)?.into_repository();
    let planner = TripPlanner::new(repository);
    let Some(value) = seed else {
        return Ok(planner);
    };
    Ok(planner
        .with_distance(GeoDistance::seeded(value))
        .with_config(AnnealingConfig::default().with_seed(value)))
}

pub(crate) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let trip = execute_plan(&args.into_config()?)?;
    write_json(writer, &trip)
}

pub(crate) fn execute_plan(config: &PlanConfig) -> Result<Trip, CliError> {
    let planner = planner_for(&config.dataset, config.seed)?;
    Ok(planner.plan(config.vehicle, &config.riders, config.algorithm)?)
}

pub(crate) fn run_replan_with(args: ReplanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let planner = planner_for(&config.dataset, config.seed)?;
    let trip = planner.replan(config.trip, config.algorithm)?;
    write_json(writer, &trip)
}

pub(crate) fn run_compare_with(args: CompareArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let planner = planner_for(&config.dataset, config.seed)?;
    let comparison = planner.compare(config.vehicle, &config.riders)?;
    write_json(writer, &ComparisonOutput::from(comparison))
}

/// JSON shape of a `compare` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ComparisonOutput {
    pub(crate) construction: ReportOutput,
    pub(crate) improvement: ReportOutput,
    pub(crate) winner: String,
    pub(crate) improvement_percent: f64,
}

/// JSON shape of one algorithm's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReportOutput {
    pub(crate) algorithm: String,
    pub(crate) distance_km: f64,
    pub(crate) duration_minutes: f64,
    pub(crate) cost: f64,
    pub(crate) elapsed_ms: u64,
    pub(crate) rider_ids: Vec<u64>,
}

impl From<Comparison> for ComparisonOutput {
    fn from(comparison: Comparison) -> Self {
        Self {
            construction: comparison.construction.into(),
            improvement: comparison.improvement.into(),
            winner: comparison.winner.to_string(),
            improvement_percent: comparison.improvement_percent,
        }
    }
}

impl From<AlgorithmReport> for ReportOutput {
    fn from(report: AlgorithmReport) -> Self {
        Self {
            algorithm: report.algorithm.to_string(),
            distance_km: report.distance_km,
            duration_minutes: report.duration_minutes,
            cost: report.cost,
            elapsed_ms: u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
            rider_ids: report.trip.riders.iter().map(|rider| rider.id).collect(),
        }
    }
}

#[cfg(test)]
pub(crate) fn plan_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
