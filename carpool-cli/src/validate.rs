//! `validate` and `stats`: inspect stored trips without re-optimising.

use std::io::Write;

use camino::Utf8PathBuf;
use carpool_core::{Conflict, ConflictValidator, TripRepository, TripStatistics};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, write_json};
use crate::{
    ARG_DATASET, ARG_TRIP, CliError, ENV_STATS_DATASET, ENV_VALIDATE_DATASET, ENV_VALIDATE_TRIP,
};

/// CLI arguments for the `validate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Check a stored trip for capacity, availability, schedule \
                 and preference conflicts and print them with a summary.",
    about = "Detect conflicts in a stored trip"
)]
#[ortho_config(prefix = "CARPOOL")]
pub(crate) struct ValidateArgs {
    /// Path to the JSON dataset.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Identifier of the stored trip.
    #[arg(long = ARG_TRIP, value_name = "id")]
    #[serde(default)]
    pub(crate) trip: Option<u64>,
}

impl ValidateArgs {
    pub(crate) fn into_config(self) -> Result<ValidateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ValidateConfig::try_from(merged)
    }
}

/// Resolved `validate` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidateConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) trip: u64,
}

impl TryFrom<ValidateArgs> for ValidateConfig {
    type Error = CliError;

    fn try_from(args: ValidateArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_VALIDATE_DATASET,
        })?;
        let trip = args.trip.ok_or(CliError::MissingArgument {
            field: ARG_TRIP,
            env: ENV_VALIDATE_TRIP,
        })?;
        Ok(Self { dataset, trip })
    }
}

/// JSON shape of a `validate` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ValidationReport {
    pub(crate) trip_id: u64,
    pub(crate) is_valid: bool,
    pub(crate) conflicts: Vec<Conflict>,
    pub(crate) summary: String,
}

pub(crate) fn run_validate_with(
    args: ValidateArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_validate(&args.into_config()?)?;
    write_json(writer, &report)
}

pub(crate) fn execute_validate(config: &ValidateConfig) -> Result<ValidationReport, CliError> {
    let repository = Dataset::load(&config.dataset)?.into_repository();
    let trip = repository.load_trip(config.trip)?;
    let validator = ConflictValidator::new();
    let conflicts = validator.detect(&trip);
    Ok(ValidationReport {
        trip_id: config.trip,
        is_valid: !conflicts.iter().any(Conflict::is_blocking),
        summary: validator.summarise(&conflicts),
        conflicts,
    })
}

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Summarise every trip in a dataset: distance, duration, \
                 occupancy, conflicts and the kilometres and CO2 saved by \
                 sharing rides.",
    about = "Summarise the trips in a dataset"
)]
#[ortho_config(prefix = "CARPOOL")]
pub(crate) struct StatsArgs {
    /// Path to the JSON dataset.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

impl StatsArgs {
    pub(crate) fn into_dataset(self) -> Result<Utf8PathBuf, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_STATS_DATASET,
        })
    }
}

pub(crate) fn run_stats_with(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let dataset = args.into_dataset()?;
    let trips = Dataset::load(&dataset)?.into_repository().list_trips()?;
    let statistics = TripStatistics::from_trips(&trips, &ConflictValidator::new())
        .ok_or(CliError::NoTrips { path: dataset })?;
    write_json(writer, &statistics)
}
