//! Test helpers for writing carpool datasets to disk.

use camino::{Utf8Path, Utf8PathBuf};
use carpool_core::{Rider, Trip, Vehicle};
use geo::Coord;
use tempfile::TempDir;
use time::macros::time;

use crate::dataset::Dataset;

pub(super) const FAMILY_CAR: u64 = 1;
pub(super) const SMALL_CAR: u64 = 2;
pub(super) const OVERLOADED_TRIP: u64 = 1;
pub(super) const VALID_TRIP: u64 = 2;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

/// Three riders on a west-to-east line, listed out of order.
pub(super) fn riders() -> Vec<Rider> {
    [(1, "Ada", 2.30), (3, "Cy", 2.32), (2, "Bo", 2.31)]
        .into_iter()
        .map(|(id, name, longitude)| {
            Rider::new(id, name)
                .with_location(Coord {
                    x: longitude,
                    y: 48.85,
                })
                .with_pickup_window(time!(08:00), time!(08:45))
        })
        .collect()
}

pub(super) fn vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle::new(FAMILY_CAR, "AB-123-CD", 3),
        Vehicle::new(SMALL_CAR, "EF-456-GH", 2),
    ]
}

pub(super) fn sample_dataset() -> Dataset {
    let mut overloaded = Trip::new(Vehicle::new(SMALL_CAR, "EF-456-GH", 2), riders());
    overloaded.id = Some(OVERLOADED_TRIP);
    let mut valid = Trip::new(
        Vehicle::new(FAMILY_CAR, "AB-123-CD", 3),
        riders().into_iter().take(2).collect(),
    );
    valid.id = Some(VALID_TRIP);
    Dataset {
        riders: riders(),
        vehicles: vehicles(),
        trips: vec![overloaded, valid],
    }
}

/// A dataset written into its own temporary directory.
#[derive(Debug)]
pub(super) struct DatasetFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl DatasetFile {
    pub(super) fn new(dataset: &Dataset) -> Self {
        let file = Self::empty_dir();
        file.write(dataset);
        file
    }

    pub(super) fn write(&self, dataset: &Dataset) {
        let payload = serde_json::to_string_pretty(dataset).expect("serialise dataset");
        write_utf8(&self.path, payload.as_bytes());
    }

    /// A path inside a fresh temporary directory with nothing written to it.
    pub(super) fn empty_dir() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            path: root.join("dataset.json"),
            _dir: dir,
        }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }
}
