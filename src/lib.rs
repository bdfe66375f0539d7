// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Clock-tree divider search.
//!
//! Models a chain of clock multiplexers fed from one bus frequency. Each
//! multiplexer offers a fixed set of prescaler ratios; the solver searches
//! every combination of selected inputs for the output frequency closest to a
//! required clock.
//!
//! # Architecture
//!
//! ## Components
//!
//! - [`Constant`](component::Constant): the bus frequency at the root of the chain
//! - [`Divider`](component::Divider): divides its input by a fixed ratio
//! - [`Multiplexer`](component::Multiplexer): forwards one of several dividers,
//!   all of which read the multiplexer's input
//!
//! Components are owned by a [`Circuit`](component::Circuit); upstream links are
//! handles into it. Outputs are pulled, recomputed through the whole chain on
//! every read.
//!
//! ## Search
//!
//! The exhaustive search runs on a small backtracking engine:
//!
//! 1. **SelectInputsPredicate**: one round per stage, one choice per input
//! 2. **EvaluatePredicate**: select the inputs on the multiplexers and read the last stage
//! 3. **FailPredicate**: backtrack, so that every combination is visited
//!
//! [`ClockSolver`](solver::ClockSolver) then ranks the evaluations by distance to
//! the required clock; ties go to the combination enumerated first.
//!
//! # Example
//!
//! ```
//! use clock_solver::config::ClockTreeConfig;
//!
//! let mut solver = ClockTreeConfig::default().build_solver().unwrap();
//! let best = solver.solve().unwrap();
//! assert_eq!(best.output(), 1.0);
//! println!("{best}");
//! ```

pub mod component;
pub mod config;
pub mod context;
pub mod engine;
pub mod predicates;
pub mod solver;
pub mod state;

// Re-export commonly used types
pub use component::{Circuit, Component, ComponentError, ComponentId, Divider, Multiplexer};
pub use config::{ClockTreeConfig, ConfigError, PrescalerRule, StageConfig};
pub use context::SearchContext;
pub use engine::{Predicate, PredicateResult, SearchEngine};
pub use solver::{ClockSolver, Configuration, Evaluation, SolverError};
