// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! SelectInputsPredicate: choose one input for every multiplexer stage.
//!
//! Round `r` handles stage `r`: it offers one choice per input of that stage
//! and writes the chosen index into `ctx.current[r]`. After the last stage the
//! predicate succeeds, leaving a complete configuration in the context.
//!
//! Since the engine explores choices depth first, later stages vary fastest
//! and configurations come out in Cartesian-product order.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};

#[derive(Debug)]
pub struct SelectInputsPredicate;

impl Predicate for SelectInputsPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult {
        match ctx.input_count(round) {
            Some(n) if n > 0 => PredicateResult::Choices(n),
            _ => PredicateResult::Failure,
        }
    }

    fn retry_pred(&mut self, ctx: &mut SearchContext, round: usize, choice: usize) -> PredicateResult {
        if ctx.current.len() != ctx.stage_count() {
            ctx.current.resize(ctx.stage_count(), 0);
        }
        ctx.current[round] = choice;
        if round + 1 < ctx.stage_count() {
            PredicateResult::SuccessSamePredicate
        } else {
            PredicateResult::Success
        }
    }

    fn name(&self) -> &str {
        "SelectInputs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Circuit, Component, Multiplexer};

    fn context(counts: &[usize]) -> SearchContext {
        let mut circuit = Circuit::new();
        let mut upstream = circuit.add(Component::constant(1.0));
        let mut stages = Vec::new();
        for &n in counts {
            upstream = circuit.add(Multiplexer::increment_one(n, Some(upstream)).unwrap());
            stages.push(upstream);
        }
        SearchContext::new(circuit, stages, 1.0)
    }

    #[test]
    fn test_choices_per_round() {
        let mut ctx = context(&[2, 4]);
        let mut pred = SelectInputsPredicate;
        assert_eq!(pred.try_pred(&mut ctx, 0), PredicateResult::Choices(2));
        assert_eq!(pred.try_pred(&mut ctx, 1), PredicateResult::Choices(4));
        assert_eq!(pred.try_pred(&mut ctx, 2), PredicateResult::Failure);
    }

    #[test]
    fn test_retry_records_choice() {
        let mut ctx = context(&[2, 4]);
        let mut pred = SelectInputsPredicate;
        assert_eq!(
            pred.retry_pred(&mut ctx, 0, 1),
            PredicateResult::SuccessSamePredicate
        );
        assert_eq!(pred.retry_pred(&mut ctx, 1, 3), PredicateResult::Success);
        assert_eq!(ctx.current, vec![1, 3]);
    }

    #[test]
    fn test_no_stages() {
        let mut ctx = SearchContext::default();
        assert_eq!(
            SelectInputsPredicate.try_pred(&mut ctx, 0),
            PredicateResult::Failure
        );
    }
}
