//! JSON datasets of riders, vehicles and trips.

use std::io::{BufReader, Write};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use carpool_core::{MemoryRepository, Rider, Trip, Vehicle};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Everything a command needs, loaded from one JSON document.
///
/// Trips embed their vehicle and riders; riders and vehicles referenced by
/// `plan` and `compare` are looked up by identifier.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub(crate) struct Dataset {
    #[serde(default)]
    pub(crate) riders: Vec<Rider>,
    #[serde(default)]
    pub(crate) vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub(crate) trips: Vec<Trip>,
}

impl Dataset {
    /// Read a dataset from disk.
    pub(crate) fn load(path: &Utf8Path) -> Result<Self, CliError> {
        let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
            CliError::OpenDataset {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let dataset: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::ParseDataset {
                path: path.to_path_buf(),
                source,
            }
        })?;
        log::debug!(
            "loaded dataset {path}: {} riders, {} vehicles, {} trips",
            dataset.riders.len(),
            dataset.vehicles.len(),
            dataset.trips.len()
        );
        Ok(dataset)
    }

    /// Move the dataset into an in-memory repository.
    pub(crate) fn into_repository(self) -> MemoryRepository {
        MemoryRepository::default()
            .with_riders(self.riders)
            .with_vehicles(self.vehicles)
            .with_trips(self.trips)
    }
}

/// Pretty-print `value` as JSON followed by a newline.
pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
