// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search predicates.
//!
//! This module contains the predicates used in the search algorithm.
//! Each predicate represents a choice point in the search space.
//!
//! # Organization
//!
//! - `select`: SelectInputsPredicate, choosing one input per multiplexer stage
//! - `evaluate`: RecordConfigurationPredicate and EvaluatePredicate, consuming a full selection
//! - Built-in predicates: `FailPredicate`, `SuspendPredicate`

pub mod evaluate;
pub mod select;

// Re-export main predicates for convenience
pub use evaluate::{EvaluatePredicate, RecordConfigurationPredicate};
pub use select::SelectInputsPredicate;

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// This predicate always fails, forcing backtracking. Ending a program with it
/// makes the engine explore every alternative of every earlier predicate.
///
/// # Example
///
/// ```
/// use clock_solver::component::{Circuit, Component, Multiplexer};
/// use clock_solver::context::SearchContext;
/// use clock_solver::engine::EngineBuilder;
/// use clock_solver::predicates::{FailPredicate, RecordConfigurationPredicate, SelectInputsPredicate};
///
/// let mut circuit = Circuit::new();
/// let bus = circuit.add(Component::constant(8.0));
/// let mux = circuit.add(Multiplexer::increment_one(3, Some(bus)).unwrap());
/// let mut ctx = SearchContext::new(circuit, vec![mux], 1.0);
///
/// let engine = EngineBuilder::new()
///     .add(Box::new(SelectInputsPredicate))
///     .add(Box::new(RecordConfigurationPredicate))
///     .terminal(Box::new(FailPredicate))
///     .build();
///
/// // Engine will exhaust all choices then fail
/// assert!(engine.search(&mut ctx).is_none());
/// assert_eq!(ctx.configurations.len(), 3);
/// ```
#[derive(Debug)]
pub struct FailPredicate;

impl Predicate for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

/// FailPredicate is a terminal predicate (like Prolog's fail.).
impl TerminalPredicate for FailPredicate {}

/// Built-in suspend predicate.
///
/// Returns control to the caller with the context as the earlier predicates
/// left it. Calling `search` again resumes with the next alternative.
#[derive(Debug)]
pub struct SuspendPredicate;

impl Predicate for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl TerminalPredicate for SuspendPredicate {}
