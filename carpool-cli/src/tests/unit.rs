//! Focused unit tests covering CLI configuration, dataset loading and output.

use super::helpers::{
    DatasetFile, FAMILY_CAR, OVERLOADED_TRIP, SMALL_CAR, VALID_TRIP, sample_dataset, write_utf8,
};
use super::*;
use camino::Utf8PathBuf;
use carpool_core::{ConflictKind, OptimiseError, RepositoryError, Trip};
use carpool_solver::{Algorithm, PlanError};
use rstest::{fixture, rstest};

use crate::dataset::Dataset;
use crate::plan::{PlanConfig, ReplanConfig, execute_plan, plan_config_from_layers_for_test};
use crate::validate::{ValidateConfig, execute_validate};

#[fixture]
fn dataset_file() -> DatasetFile {
    DatasetFile::new(&sample_dataset())
}

fn plan_config(file: &DatasetFile, vehicle: u64, riders: Vec<u64>) -> PlanConfig {
    PlanConfig {
        dataset: file.path().to_path_buf(),
        vehicle,
        riders,
        algorithm: Algorithm::Construction,
        seed: Some(7),
    }
}

#[rstest]
#[case(None, Some(1), ARG_DATASET, ENV_PLAN_DATASET)]
#[case(Some(Utf8PathBuf::from("data.json")), None, ARG_VEHICLE, ENV_PLAN_VEHICLE)]
fn converting_plan_without_required_fields_errors(
    #[case] dataset: Option<Utf8PathBuf>,
    #[case] vehicle: Option<u64>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = PlanArgs {
        dataset,
        vehicle,
        ..PlanArgs::default()
    };
    let err = PlanConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(None, Algorithm::Construction)]
#[case(Some("improvement"), Algorithm::Improvement)]
#[case(Some("Nearest_Neighbour"), Algorithm::Construction)]
fn plan_config_resolves_algorithm(#[case] name: Option<&str>, #[case] expected: Algorithm) {
    let args = PlanArgs {
        dataset: Some(Utf8PathBuf::from("data.json")),
        vehicle: Some(FAMILY_CAR),
        riders: vec![1, 2],
        algorithm: name.map(str::to_owned),
        seed: None,
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.algorithm, expected);
    assert_eq!(config.riders, vec![1, 2]);
}

#[rstest]
fn unknown_algorithm_is_rejected() {
    let args = ReplanArgs {
        dataset: Some(Utf8PathBuf::from("data.json")),
        trip: Some(1),
        algorithm: Some("genetic".to_owned()),
        seed: None,
    };
    let err = ReplanConfig::try_from(args).expect_err("unknown algorithm should error");
    match err {
        CliError::UnknownAlgorithm(unknown) => assert_eq!(unknown.0, "genetic"),
        other => panic!("expected UnknownAlgorithm, found {other:?}"),
    }
}

#[rstest]
fn compare_config_defaults_the_algorithm() {
    let args = CompareArgs {
        dataset: Some(Utf8PathBuf::from("data.json")),
        vehicle: Some(FAMILY_CAR),
        riders: vec![3],
        seed: Some(1),
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.algorithm, Algorithm::default());
    assert_eq!(config.seed, Some(1));
}

#[rstest]
fn converting_validate_without_trip_errors() {
    let args = ValidateArgs {
        dataset: Some(Utf8PathBuf::from("data.json")),
        trip: None,
    };
    let err = ValidateConfig::try_from(args).expect_err("missing trip should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_TRIP);
            assert_eq!(env, ENV_VALIDATE_TRIP);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "vehicle": "the blue one" }));

    let err = plan_config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "vehicle": FAMILY_CAR, "algorithm": "improvement" }),
        None,
    );
    composer.push_environment(json!({ "dataset": "from-env.json", "seed": 11 }));
    composer.push_cli(json!({ "vehicle": SMALL_CAR }));

    let config =
        plan_config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.dataset, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.vehicle, SMALL_CAR);
    assert_eq!(config.algorithm, Algorithm::Improvement);
    assert_eq!(config.seed, Some(11));
}

#[rstest]
fn loading_a_missing_dataset_reports_the_path() {
    let file = DatasetFile::empty_dir();
    let err = Dataset::load(file.path()).expect_err("missing dataset should error");
    match err {
        CliError::OpenDataset { path, .. } => assert_eq!(path, file.path()),
        other => panic!("expected OpenDataset, found {other:?}"),
    }
}

#[rstest]
fn loading_invalid_json_reports_a_parse_error() {
    let file = DatasetFile::empty_dir();
    write_utf8(file.path(), b"{ \"riders\": [ oops");
    let err = Dataset::load(file.path()).expect_err("invalid dataset should error");
    match err {
        CliError::ParseDataset { path, .. } => assert_eq!(path, file.path()),
        other => panic!("expected ParseDataset, found {other:?}"),
    }
}

#[rstest]
fn missing_sections_default_to_empty() {
    let file = DatasetFile::empty_dir();
    write_utf8(file.path(), b"{ \"vehicles\": [ { \"id\": 4, \"capacity\": 2 } ] }");
    let dataset = Dataset::load(file.path()).expect("dataset should load");
    assert!(dataset.riders.is_empty());
    assert!(dataset.trips.is_empty());
    assert_eq!(dataset.vehicles.len(), 1);
    assert!(dataset.vehicles[0].available);
}

#[rstest]
fn planning_orders_riders_and_assigns_the_next_trip_id(dataset_file: DatasetFile) {
    let trip = execute_plan(&plan_config(&dataset_file, FAMILY_CAR, vec![1, 3, 2]))
        .expect("plan should succeed");
    let order: Vec<u64> = trip.riders.iter().map(|rider| rider.id).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(trip.id, Some(3));
    assert!(trip.optimised);
    assert!(trip.distance_km > 0.0);
}

#[rstest]
fn planning_beyond_capacity_fails(dataset_file: DatasetFile) {
    let err = execute_plan(&plan_config(&dataset_file, SMALL_CAR, vec![1, 2, 3]))
        .expect_err("three riders do not fit in two seats");
    match err {
        CliError::Plan(PlanError::Optimise(OptimiseError::CapacityExceeded {
            riders,
            capacity,
        })) => {
            assert_eq!(riders, 3);
            assert_eq!(capacity, 2);
        }
        other => panic!("expected CapacityExceeded, found {other:?}"),
    }
}

#[rstest]
fn planning_for_an_unknown_vehicle_fails(dataset_file: DatasetFile) {
    let err = execute_plan(&plan_config(&dataset_file, 99, vec![1]))
        .expect_err("vehicle 99 does not exist");
    match err {
        CliError::Plan(PlanError::Repository(RepositoryError::NotFound { entity, id })) => {
            assert_eq!(entity, "vehicle");
            assert_eq!(id, 99);
        }
        other => panic!("expected NotFound, found {other:?}"),
    }
}

#[rstest]
fn validating_reports_capacity_conflicts(dataset_file: DatasetFile) {
    let report = execute_validate(&ValidateConfig {
        dataset: dataset_file.path().to_path_buf(),
        trip: OVERLOADED_TRIP,
    })
    .expect("validation should run");
    assert!(!report.is_valid);
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].kind, ConflictKind::Capacity);
    assert!(report.summary.starts_with("1 conflict(s) detected:"));
}

#[rstest]
fn validating_a_clean_trip_reports_no_conflicts(dataset_file: DatasetFile) {
    let report = execute_validate(&ValidateConfig {
        dataset: dataset_file.path().to_path_buf(),
        trip: VALID_TRIP,
    })
    .expect("validation should run");
    assert!(report.is_valid);
    assert!(report.conflicts.is_empty());
    assert_eq!(report.summary, "No conflicts detected. The trip is valid.");
}

#[rstest]
fn replan_prints_the_updated_trip(dataset_file: DatasetFile) {
    let args = ReplanArgs {
        dataset: Some(dataset_file.path().to_path_buf()),
        trip: Some(VALID_TRIP),
        algorithm: None,
        seed: Some(3),
    };
    let mut buffer = Vec::new();
    dispatch(Command::Replan(args), &mut buffer).expect("replan should succeed");
    let trip: Trip = serde_json::from_slice(&buffer).expect("output should be a trip");
    assert_eq!(trip.id, Some(VALID_TRIP));
    assert!(trip.optimised);
    assert_eq!(trip.riders.len(), 2);
}

#[rstest]
fn stats_summarise_every_trip(dataset_file: DatasetFile) {
    let args = StatsArgs {
        dataset: Some(dataset_file.path().to_path_buf()),
    };
    let mut buffer = Vec::new();
    dispatch(Command::Stats(args), &mut buffer).expect("stats should succeed");
    let stats: serde_json::Value = serde_json::from_slice(&buffer).expect("output should be JSON");
    assert_eq!(stats["total_trips"], 2);
    assert_eq!(stats["total_riders"], 5);
    assert_eq!(stats["total_conflicts"], 1);
}

#[rstest]
fn stats_without_trips_fail() {
    let file = DatasetFile::new(&Dataset::default());
    let args = StatsArgs {
        dataset: Some(file.path().to_path_buf()),
    };
    let mut buffer = Vec::new();
    let err = dispatch(Command::Stats(args), &mut buffer).expect_err("no trips to summarise");
    match err {
        CliError::NoTrips { path } => assert_eq!(path, file.path()),
        other => panic!("expected NoTrips, found {other:?}"),
    }
    assert!(buffer.is_empty());
}
