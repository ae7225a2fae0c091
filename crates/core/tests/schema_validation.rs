//! Validates the booking fixtures against schema/booking-schema.json and
//! checks that every schema-valid fixture deserializes into a `Booking`.

use std::path::{Path, PathBuf};

use autorenta_core::Booking;

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn load_validator() -> jsonschema::Validator {
    let schema_path = workspace_root().join("schema/booking-schema.json");
    let schema_src = std::fs::read_to_string(&schema_path)
        .unwrap_or_else(|e| panic!("Failed to read schema at {}: {}", schema_path.display(), e));
    let schema_value: serde_json::Value = serde_json::from_str(&schema_src).unwrap();
    jsonschema::validator_for(&schema_value)
        .unwrap_or_else(|e| panic!("Failed to compile schema: {}", e))
}

fn fixture_files() -> Vec<PathBuf> {
    let dir = workspace_root().join("fixtures/bookings");
    let mut paths: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |e| e == "json"))
        .collect();
    paths.sort();
    paths
}

fn read_json(path: &Path) -> serde_json::Value {
    let src = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&src).unwrap()
}

#[test]
fn valid_fixtures_pass_schema_and_deserialize() {
    let validator = load_validator();
    let mut tested = 0usize;
    let mut failures = Vec::new();

    for path in fixture_files() {
        if path.to_string_lossy().contains("invalid") {
            continue;
        }
        let instance = read_json(&path);
        if let Err(error) = validator.validate(&instance) {
            failures.push(format!("{}: {}", path.display(), error));
        }
        if let Err(e) = serde_json::from_value::<Option<Booking>>(instance) {
            failures.push(format!("{}: does not deserialize: {}", path.display(), e));
        }
        tested += 1;
    }

    assert!(tested > 0, "No booking fixtures found -- check paths");
    assert!(
        failures.is_empty(),
        "{} of {} fixtures failed:\n{}",
        failures.len(),
        tested,
        failures.join("\n")
    );
}

#[test]
fn invalid_fixture_is_rejected() {
    let validator = load_validator();
    let instance = read_json(&workspace_root().join("fixtures/bookings/invalid_shape.json"));
    assert!(!validator.is_valid(&instance));
}

#[test]
fn lifecycle_export_is_plain_json() {
    let json = autorenta_core::BookingLifecycle::build().to_json();
    assert!(json["states"].is_array());
    assert_eq!(json["initial"], "DRAFT");
}
