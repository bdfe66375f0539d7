// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Predicates consuming the complete configuration built by
//! [`SelectInputsPredicate`](super::SelectInputsPredicate).

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};

/// Appends the current configuration to `ctx.configurations`.
#[derive(Debug)]
pub struct RecordConfigurationPredicate;

impl Predicate for RecordConfigurationPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        let configuration = ctx.current_configuration();
        ctx.configurations.push(configuration);
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "RecordConfiguration"
    }
}

/// Selects the current configuration on the multiplexers, reads the last
/// stage and appends the evaluation to `ctx.evaluations`.
///
/// A component error is stored in `ctx.failure` and the search suspends, so
/// the caller sees the error instead of a ranking over partial results.
#[derive(Debug)]
pub struct EvaluatePredicate;

impl Predicate for EvaluatePredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        let configuration = ctx.current_configuration();
        match ctx.evaluate(configuration) {
            Ok(evaluation) => {
                tracing::trace!(
                    configuration = %evaluation.configuration(),
                    output = evaluation.output(),
                    "evaluated"
                );
                ctx.evaluations.push(evaluation);
                PredicateResult::Success
            }
            Err(failure) => {
                ctx.failure = Some(failure);
                PredicateResult::Suspend
            }
        }
    }

    fn name(&self) -> &str {
        "Evaluate"
    }
}
