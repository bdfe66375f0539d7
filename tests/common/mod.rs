// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

use clock_solver::{ClockSolver, ClockTreeConfig, StageConfig};

/// Build a solver from stage strings such as `"exp:5"` or `"inc:3"`.
pub fn solver(bus_frequency: f64, required_clock: f64, stages: &[&str]) -> ClockSolver {
    let config = ClockTreeConfig {
        bus_frequency,
        required_clock,
        stages: stages
            .iter()
            .map(|s| s.parse::<StageConfig>().expect("valid stage"))
            .collect(),
    };
    config.build_solver().expect("valid clock tree")
}
