// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for the clock solver.
//!
//! These tests validate that the solver:
//! - Enumerates the full Cartesian product of stage inputs, in order
//! - Evaluates configurations deterministically, statefully and statelessly
//! - Returns the closest evaluation, breaking ties by enumeration order
//! - Surfaces construction errors instead of results

mod common;

use std::collections::HashSet;

use clock_solver::component::OutputPin;
use clock_solver::state::Counters;
use clock_solver::{
    Circuit, ClockSolver, ComponentError, Configuration, Divider, Multiplexer, SolverError,
};

#[test]
fn test_configuration_count_and_bounds() {
    let mut solver = common::solver(48.0, 5.0, &["exp:3", "inc:4", "inc:2"]);
    let configs = solver.generate_configurations();

    assert_eq!(configs.len(), 3 * 4 * 2);
    assert_eq!(solver.statistics().get(Counters::ConfigurationsEnumerated), 24);

    let distinct: HashSet<_> = configs.iter().cloned().collect();
    assert_eq!(distinct.len(), configs.len());

    let counts = [3, 4, 2];
    for config in &configs {
        assert_eq!(config.len(), 3);
        for (stage, &index) in config.iter().enumerate() {
            assert!(index < counts[stage]);
        }
    }
}

#[test]
fn test_configurations_in_product_order() {
    let mut solver = common::solver(6.0, 1.0, &["inc:2", "inc:3"]);
    let configs: Vec<Vec<usize>> = solver
        .generate_configurations()
        .iter()
        .map(|c| c.as_slice().to_vec())
        .collect();

    assert_eq!(
        configs,
        vec![
            vec![0, 0],
            vec![0, 1],
            vec![0, 2],
            vec![1, 0],
            vec![1, 1],
            vec![1, 2],
        ]
    );
}

#[test]
fn test_evaluate_is_deterministic() {
    let mut solver = common::solver(100.0, 3.0, &["inc:5", "exp:4"]);
    for config in solver.generate_configurations() {
        let first = solver.evaluate(&config).unwrap();
        let second = solver.evaluate(&config).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_stateless_matches_stateful() {
    let mut solver = common::solver(33.0, 2.0, &["inc:5", "exp:4", "inc:3"]);
    for config in solver.generate_configurations() {
        let stateless = solver.evaluate_stateless(&config).unwrap();
        let stateful = solver.evaluate(&config).unwrap();
        assert_eq!(stateless, stateful.output(), "configuration {config}");
    }
}

#[test]
fn test_solve_is_minimal() {
    let mut solver = common::solver(100.0, 7.0, &["inc:5", "exp:3"]);
    let best = solver.solve().unwrap();

    // 100 / (4 * 4) = 6.25 is the closest to 7.
    assert_eq!(best.configuration().as_slice(), &[3, 2]);
    assert_eq!(best.output(), 6.25);

    for config in solver.generate_configurations() {
        let eval = solver.evaluate(&config).unwrap();
        assert!(best.delta(7.0) <= eval.delta(7.0));
    }
}

#[test]
fn test_tie_goes_to_first_enumerated() {
    // (0, 1) and (1, 0) both produce 6.0.
    let mut solver = common::solver(12.0, 6.0, &["inc:2", "inc:2"]);
    let best = solver.solve().unwrap();
    assert_eq!(best.configuration(), &Configuration::from(vec![0, 1]));
    assert_eq!(solver.statistics().get(Counters::ExactMatches), 2);
}

#[test]
fn test_example_scenario() {
    let mut solver = common::solver(16.0, 1.0, &["exponent_over_two:5", "increment_one:5"]);
    let best = solver.solve().unwrap();

    assert_eq!(best.output(), 1.0);
    assert_eq!(best.delta(1.0), 0.0);
    // (4, 0) is exact too, but (2, 3) is enumerated first.
    assert_eq!(best.configuration().as_slice(), &[2, 3]);
    let exact = solver.evaluate(&Configuration::from(vec![4, 0])).unwrap();
    assert_eq!(exact.output(), 1.0);

    assert_eq!(
        best.to_string(),
        "Multiplexer 1 active input 3\nMultiplexer 2 active input 4\nAchieved frequency: 1\n"
    );
}

#[test]
fn test_single_stage() {
    let mut solver = common::solver(10.0, 3.0, &["inc:4"]);
    let best = solver.solve().unwrap();
    assert_eq!(best.configuration().as_slice(), &[2]);
    assert!((best.output() - 10.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_solve_twice() {
    let mut solver = common::solver(16.0, 3.0, &["exp:5", "inc:5"]);
    let first = solver.solve().unwrap();
    let second = solver.solve().unwrap();
    assert_eq!(first, second);
    assert_eq!(solver.evaluations().len(), 25);
}

#[test]
fn test_empty_stage_list() {
    assert_eq!(
        ClockSolver::new(16.0, 1.0, vec![]).unwrap_err(),
        SolverError::EmptyChain
    );
}

#[test]
fn test_bare_divider_unconfigured() {
    let divider = Divider::new(2.0).unwrap();
    assert_eq!(
        divider.output_pin(&Circuit::new()),
        Err(ComponentError::UnconfiguredUpstream { kind: "Divider" })
    );
}

#[test]
fn test_evaluate_rejects_bad_configuration() {
    let mut solver =
        ClockSolver::new(8.0, 1.0, vec![Multiplexer::increment_one(2, None).unwrap()]).unwrap();

    assert_eq!(
        solver.evaluate(&Configuration::from(vec![0, 0])),
        Err(SolverError::ConfigurationLength {
            expected: 1,
            actual: 2
        })
    );
    let out_of_range = Err(SolverError::Component(ComponentError::IndexOutOfRange {
        index: 2,
        count: 2,
    }));
    assert_eq!(
        solver.evaluate(&Configuration::from(vec![2])).map(|e| e.output()),
        out_of_range
    );
    assert_eq!(
        solver.evaluate_stateless(&Configuration::from(vec![2])),
        out_of_range
    );
}

#[test]
fn test_factories_through_solver() {
    let solver = common::solver(1.0, 1.0, &["exp:4", "inc:4"]);
    assert_eq!(solver.multiplexer(0).unwrap().divisors(), vec![1.0, 2.0, 4.0, 8.0]);
    assert_eq!(solver.multiplexer(1).unwrap().divisors(), vec![1.0, 2.0, 3.0, 4.0]);
    assert!(solver.multiplexer(2).is_none());
}
