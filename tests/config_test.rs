// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Loading clock-tree descriptions from disk.

use std::io::Write;

use clock_solver::{ClockTreeConfig, ConfigError, PrescalerRule, StageConfig};

#[test]
fn test_load_and_solve() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "bus_frequency": 48.0,
            "required_clock": 5.0,
            "stages": [
                {{ "rule": "increment_one", "inputs": 4 }},
                {{ "rule": "exponent_over_two", "inputs": 3 }}
            ]
        }}"#
    )
    .unwrap();

    let config = ClockTreeConfig::load(file.path()).unwrap();
    assert_eq!(
        config.stages,
        vec![
            StageConfig::new(PrescalerRule::IncrementOne, 4),
            StageConfig::new(PrescalerRule::ExponentOverTwo, 3),
        ]
    );

    // 48 / (2 * 4) = 6 and 48 / (3 * 4) = 4 are both 1 away; (1, 2) comes first.
    let best = config.build_solver().unwrap().solve().unwrap();
    assert_eq!(best.configuration().as_slice(), &[1, 2]);
    assert_eq!(best.output(), 6.0);
}

#[test]
fn test_default_round_trips() {
    let config = ClockTreeConfig::default();
    let json = config.to_json_string().unwrap();
    assert_eq!(ClockTreeConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ClockTreeConfig::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}
