// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context shared by the predicates of one search.
//!
//! The SearchContext combines:
//! - The wired circuit and the handles of its multiplexer stages
//! - The configuration currently being built by the search
//! - The configurations and evaluations collected so far
//! - Statistics, and the failure that stopped the search (if any)

use crate::component::{Circuit, ComponentId};
use crate::solver::{Configuration, Evaluation, SolverError};
use crate::state::statistics::Statistics;

/// Search context for enumerating and evaluating multiplexer selections.
#[derive(Debug, Default)]
pub struct SearchContext {
    /// All components, including the bus constant and every stage.
    pub circuit: Circuit,

    /// Multiplexer stages in chain order.
    pub stages: Vec<ComponentId>,

    /// Target frequency, used by filters that look at the latest evaluation.
    pub required_clock: f64,

    /// Selected input per stage for the configuration under construction.
    pub current: Vec<usize>,

    /// Configurations recorded by `RecordConfigurationPredicate`.
    pub configurations: Vec<Configuration>,

    /// Evaluations recorded by `EvaluatePredicate`.
    pub evaluations: Vec<Evaluation>,

    /// Error that suspended the search.
    pub failure: Option<SolverError>,

    pub statistics: Statistics,
}

impl SearchContext {
    /// Create a context over an already wired chain.
    pub fn new(circuit: Circuit, stages: Vec<ComponentId>, required_clock: f64) -> Self {
        let current = vec![0; stages.len()];
        Self {
            circuit,
            stages,
            required_clock,
            current,
            ..Self::default()
        }
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Number of inputs of stage `stage`, or None if there is no such multiplexer.
    pub fn input_count(&self, stage: usize) -> Option<usize> {
        let id = *self.stages.get(stage)?;
        self.circuit.multiplexer(id).ok().map(|mux| mux.input_count())
    }

    /// The configuration under construction.
    pub fn current_configuration(&self) -> Configuration {
        Configuration::from(self.current.clone())
    }

    /// Select `configuration[i]` on stage i, left to right.
    pub fn apply(&mut self, configuration: &Configuration) -> Result<(), SolverError> {
        if configuration.len() != self.stages.len() {
            return Err(SolverError::ConfigurationLength {
                expected: self.stages.len(),
                actual: configuration.len(),
            });
        }
        for (&id, &index) in self.stages.iter().zip(configuration.iter()) {
            self.circuit.multiplexer_mut(id)?.select(index);
        }
        Ok(())
    }

    /// Apply `configuration` and read the last stage's output once.
    ///
    /// The configuration stays selected on the multiplexers afterwards.
    pub fn evaluate(&mut self, configuration: Configuration) -> Result<Evaluation, SolverError> {
        let last = *self.stages.last().ok_or(SolverError::EmptyChain)?;
        self.apply(&configuration)?;
        let output = self.circuit.output_pin(last)?;
        Ok(Evaluation::new(configuration, output))
    }

    /// Clear results of a previous search, keeping the circuit.
    pub fn reset(&mut self) {
        self.current = vec![0; self.stages.len()];
        self.configurations.clear();
        self.evaluations.clear();
        self.failure = None;
        self.statistics = Statistics::new();
    }
}
