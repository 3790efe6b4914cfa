//! Error types emitted by the carpool CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace denies `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use carpool_core::RepositoryError;
use carpool_solver::{PlanError, UnknownAlgorithm};
use thiserror::Error;

/// Errors emitted by the carpool CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it instead.
        env: &'static str,
    },
    /// The `--algorithm` value names no known heuristic.
    #[error(transparent)]
    UnknownAlgorithm(#[from] UnknownAlgorithm),
    /// Opening the dataset file failed.
    #[error("failed to open dataset at {path:?}: {source}")]
    OpenDataset {
        /// Dataset path as given.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The dataset JSON could not be decoded.
    #[error("failed to parse dataset JSON at {path:?}: {source}")]
    ParseDataset {
        /// Dataset path as given.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The dataset holds no trips to summarise.
    #[error("dataset {path:?} contains no trips")]
    NoTrips {
        /// Dataset path as given.
        path: Utf8PathBuf,
    },
    /// A rider, vehicle or trip is missing from the dataset.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// Planning or comparing failed.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
