// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for chain setup and search.

use thiserror::Error;

use crate::component::ComponentError;

/// Errors that can occur while building or searching a multiplexer chain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// There is no last stage to read a frequency from.
    #[error("a clock solver needs at least one multiplexer")]
    EmptyChain,

    /// Bus and required frequencies must be positive and finite.
    #[error("{name} must be a positive frequency, got {value}")]
    InvalidFrequency { name: &'static str, value: f64 },

    /// A configuration must name exactly one input per stage.
    #[error("configuration has {actual} selections but the chain has {expected} stages")]
    ConfigurationLength { expected: usize, actual: usize },

    #[error(transparent)]
    Component(#[from] ComponentError),
}
