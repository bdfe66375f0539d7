// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for component construction, wiring and evaluation.

use thiserror::Error;

use super::ComponentId;

/// Errors that can occur while building or reading components.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComponentError {
    /// A divider or multiplexer was read before its upstream was assigned.
    #[error("{kind} doesn't have its input component set, output invalid")]
    UnconfiguredUpstream { kind: &'static str },

    /// Divisors must be strictly positive and finite.
    #[error("invalid divisor {0}: prescaler ratios must be positive")]
    InvalidDivisor(f64),

    /// A multiplexer needs at least one prescaler branch.
    #[error("multiplexer constructed with no prescalers")]
    NoPrescalers,

    /// The selected index does not name a prescaler branch.
    #[error("selected input {index} is out of range for a multiplexer with {count} inputs")]
    IndexOutOfRange { index: usize, count: usize },

    /// The handle does not belong to this circuit.
    #[error("component {0} is not part of this circuit")]
    UnknownComponent(ComponentId),

    /// The handle names a component that is not a multiplexer.
    #[error("component {0} is not a multiplexer")]
    NotAMultiplexer(ComponentId),

    /// Constants have no input pin to connect.
    #[error("component {0} has no input pin")]
    NoInputPin(ComponentId),

    /// Connecting `component` to `upstream` would close a loop.
    #[error("connecting {component} to {upstream} would create a cycle")]
    CyclicConnection {
        component: ComponentId,
        upstream: ComponentId,
    },
}
