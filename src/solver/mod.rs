// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exhaustive search for the multiplexer selection closest to a target clock.
//!
//! [`ClockSolver`] wires its multiplexers into a linear chain: the first stage
//! reads the bus constant and every later stage reads the stage before it.
//! [`ClockSolver::solve`] then evaluates every combination of selected inputs
//! and returns the one whose output frequency is closest to the required
//! clock. Ties go to the configuration enumerated first, where the last stage
//! varies fastest.
//!
//! # Example
//!
//! ```
//! use clock_solver::component::Multiplexer;
//! use clock_solver::solver::ClockSolver;
//!
//! let mut solver = ClockSolver::new(16.0, 1.0, vec![
//!     Multiplexer::exponent_over_two(5, None).unwrap(),
//!     Multiplexer::increment_one(5, None).unwrap(),
//! ]).unwrap();
//!
//! // 16/4/4, 16/8/2 and 16/16/1 all hit 1.0; the first enumerated wins.
//! let best = solver.solve().unwrap();
//! assert_eq!(best.configuration().as_slice(), &[2, 3]);
//! assert_eq!(best.output(), 1.0);
//! ```

pub mod errors;
pub mod evaluation;

pub use errors::SolverError;
pub use evaluation::{Configuration, Evaluation};

use tracing::{debug, info};

use crate::component::{Circuit, Component, ComponentError, ComponentId, Multiplexer};
use crate::context::SearchContext;
use crate::engine::EngineBuilder;
use crate::predicates::{
    EvaluatePredicate, FailPredicate, RecordConfigurationPredicate, SelectInputsPredicate,
};
use crate::state::statistics::{last_evaluation_exact, Counters, Statistics};

/// Solver for a chain of prescaling multiplexers.
#[derive(Debug)]
pub struct ClockSolver {
    /// Input clock frequency.
    clock_bus: f64,
    /// Target clock frequency.
    required_clock: f64,
    /// Constant component feeding the first stage.
    bus: ComponentId,
    ctx: SearchContext,
}

impl ClockSolver {
    /// Build the chain and wire every multiplexer to its upstream.
    ///
    /// Fails if either frequency is not positive and finite, or if
    /// `multiplexers` is empty.
    pub fn new(
        clock_bus: f64,
        required_clock: f64,
        multiplexers: Vec<Multiplexer>,
    ) -> Result<Self, SolverError> {
        check_frequency("bus frequency", clock_bus)?;
        check_frequency("required clock", required_clock)?;
        if multiplexers.is_empty() {
            return Err(SolverError::EmptyChain);
        }

        let mut circuit = Circuit::new();
        let bus = circuit.add(Component::constant(clock_bus));
        let stages = multiplexers
            .into_iter()
            .map(|mux| circuit.add(mux))
            .collect();

        let mut solver = Self {
            clock_bus,
            required_clock,
            bus,
            ctx: SearchContext::new(circuit, stages, required_clock),
        };
        solver.setup_chain()?;
        Ok(solver)
    }

    /// Set the correct input component of each multiplexer.
    fn setup_chain(&mut self) -> Result<(), SolverError> {
        for i in 0..self.ctx.stages.len() {
            let upstream = if i > 0 { self.ctx.stages[i - 1] } else { self.bus };
            self.ctx.circuit.connect(self.ctx.stages[i], upstream)?;
        }
        debug!(
            stages = self.ctx.stages.len(),
            clock_bus = self.clock_bus,
            "multiplexer chain wired"
        );
        Ok(())
    }

    pub fn clock_bus(&self) -> f64 {
        self.clock_bus
    }

    pub fn required_clock(&self) -> f64 {
        self.required_clock
    }

    pub fn stage_count(&self) -> usize {
        self.ctx.stage_count()
    }

    /// The multiplexer at position `stage` of the chain.
    pub fn multiplexer(&self, stage: usize) -> Option<&Multiplexer> {
        let id = *self.ctx.stages.get(stage)?;
        self.ctx.circuit.multiplexer(id).ok()
    }

    /// Number of configurations a full search visits.
    pub fn search_space_size(&self) -> usize {
        (0..self.stage_count())
            .filter_map(|stage| self.ctx.input_count(stage))
            .product()
    }

    /// Every combination of selected inputs, in Cartesian-product order.
    pub fn generate_configurations(&mut self) -> Vec<Configuration> {
        self.ctx.configurations.clear();
        let engine = EngineBuilder::new()
            .add(Box::new(SelectInputsPredicate))
            .add(Box::new(RecordConfigurationPredicate))
            .add(Statistics::counting_predicate(
                Counters::ConfigurationsEnumerated,
                None,
            ))
            .terminal(Box::new(FailPredicate))
            .build();
        engine.search(&mut self.ctx);
        std::mem::take(&mut self.ctx.configurations)
    }

    /// Select the inputs of `configuration` and read the resulting frequency.
    ///
    /// The configuration stays selected on the multiplexers afterwards.
    pub fn evaluate(&mut self, configuration: &Configuration) -> Result<Evaluation, SolverError> {
        self.ctx.evaluate(configuration.clone())
    }

    /// Frequency produced by `configuration`, computed from the divisor ratios
    /// alone. Multiplexer selections are left untouched.
    pub fn evaluate_stateless(&self, configuration: &Configuration) -> Result<f64, SolverError> {
        if configuration.len() != self.stage_count() {
            return Err(SolverError::ConfigurationLength {
                expected: self.stage_count(),
                actual: configuration.len(),
            });
        }
        let mut output = self.clock_bus;
        for (&id, &index) in self.ctx.stages.iter().zip(configuration.iter()) {
            let mux = self.ctx.circuit.multiplexer(id)?;
            let divisor = mux.divisor(index).ok_or(ComponentError::IndexOutOfRange {
                index,
                count: mux.input_count(),
            })?;
            output /= divisor;
        }
        Ok(output)
    }

    /// Evaluate every configuration and return the one closest to the required clock.
    ///
    /// Any component error aborts the search; no partial ranking is produced.
    pub fn solve(&mut self) -> Result<Evaluation, SolverError> {
        self.ctx.reset();
        info!(
            clock_bus = self.clock_bus,
            required_clock = self.required_clock,
            configurations = self.search_space_size(),
            "searching multiplexer configurations"
        );

        let engine = EngineBuilder::new()
            .add(Box::new(SelectInputsPredicate))
            .add(Box::new(EvaluatePredicate))
            .add(Statistics::counting_predicate(
                Counters::ConfigurationsEvaluated,
                None,
            ))
            .add(Statistics::counting_predicate(
                Counters::ExactMatches,
                Some(last_evaluation_exact),
            ))
            .terminal(Box::new(FailPredicate))
            .build();
        engine.search(&mut self.ctx);

        if let Some(failure) = self.ctx.failure.take() {
            self.ctx.evaluations.clear();
            return Err(failure);
        }

        let required_clock = self.required_clock;
        let best = self
            .ctx
            .evaluations
            .iter()
            .min_by(|a, b| a.delta(required_clock).total_cmp(&b.delta(required_clock)))
            .cloned()
            .ok_or(SolverError::EmptyChain)?;

        info!(
            configuration = %best.configuration(),
            output = best.output(),
            delta = best.delta(required_clock),
            evaluated = self.ctx.statistics.get(Counters::ConfigurationsEvaluated),
            exact = self.ctx.statistics.get(Counters::ExactMatches),
            "best configuration found"
        );
        Ok(best)
    }

    /// Evaluations collected by the last [`solve`](Self::solve), in enumeration order.
    pub fn evaluations(&self) -> &[Evaluation] {
        &self.ctx.evaluations
    }

    /// Evaluations of the last [`solve`](Self::solve), closest first.
    ///
    /// The sort is stable, so equally close evaluations keep enumeration order.
    pub fn ranked(&self) -> Vec<&Evaluation> {
        let mut ranked: Vec<&Evaluation> = self.ctx.evaluations.iter().collect();
        ranked.sort_by(|a, b| {
            a.delta(self.required_clock)
                .total_cmp(&b.delta(self.required_clock))
        });
        ranked
    }

    pub fn statistics(&self) -> &Statistics {
        &self.ctx.statistics
    }
}

fn check_frequency(name: &'static str, value: f64) -> Result<(), SolverError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidFrequency { name, value })
    }
}
