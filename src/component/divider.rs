// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Prescaler: divides its upstream value by a fixed ratio.

use super::{Circuit, ComponentError, ComponentId, OutputPin};

/// A component dividing its input by a fixed, strictly positive ratio.
///
/// Dividers are used as the prescaler branches of a
/// [`Multiplexer`](super::Multiplexer), but can also stand alone in a
/// [`Circuit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Divider {
    divide_by: f64,
    input: Option<ComponentId>,
}

impl Divider {
    /// Create an unconnected divider.
    ///
    /// Fails with [`ComponentError::InvalidDivisor`] unless `divide_by` is
    /// finite and greater than zero.
    pub fn new(divide_by: f64) -> Result<Self, ComponentError> {
        if !divide_by.is_finite() || divide_by <= 0.0 {
            return Err(ComponentError::InvalidDivisor(divide_by));
        }
        Ok(Self {
            divide_by,
            input: None,
        })
    }

    /// Create a divider already connected to `upstream`.
    pub fn with_upstream(divide_by: f64, upstream: ComponentId) -> Result<Self, ComponentError> {
        let mut divider = Self::new(divide_by)?;
        divider.set_upstream(upstream);
        Ok(divider)
    }

    /// The ratio this divider applies.
    pub fn divide_by(&self) -> f64 {
        self.divide_by
    }

    /// The component feeding this divider, if connected.
    pub fn upstream(&self) -> Option<ComponentId> {
        self.input
    }

    pub fn set_upstream(&mut self, upstream: ComponentId) {
        self.input = Some(upstream);
    }

    /// Used by multiplexers to keep their prescalers on the same input.
    pub(super) fn set_input(&mut self, input: Option<ComponentId>) {
        self.input = input;
    }
}

impl OutputPin for Divider {
    fn output_pin(&self, circuit: &Circuit) -> Result<f64, ComponentError> {
        let upstream = self
            .input
            .ok_or(ComponentError::UnconfiguredUpstream { kind: "Divider" })?;
        Ok(circuit.output_pin(upstream)? / self.divide_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;

    #[test]
    fn test_rejects_non_positive_divisor() {
        assert_eq!(Divider::new(0.0), Err(ComponentError::InvalidDivisor(0.0)));
        assert_eq!(Divider::new(-2.0), Err(ComponentError::InvalidDivisor(-2.0)));
        assert!(Divider::new(f64::NAN).is_err());
        assert!(Divider::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_unconfigured_upstream() {
        let divider = Divider::new(2.0).unwrap();
        let circuit = Circuit::new();
        assert_eq!(
            divider.output_pin(&circuit),
            Err(ComponentError::UnconfiguredUpstream { kind: "Divider" })
        );
    }

    #[test]
    fn test_divides_upstream() {
        let mut circuit = Circuit::new();
        let source = circuit.add(Component::constant(10.0));

        for (divisor, expected) in [(1.0, 10.0), (2.0, 5.0), (4.0, 2.5), (3.0, 10.0 / 3.0)] {
            let divider = Divider::with_upstream(divisor, source).unwrap();
            assert_eq!(divider.output_pin(&circuit).unwrap(), expected);
        }
    }

    #[test]
    fn test_fractional_divisor() {
        let mut circuit = Circuit::new();
        let source = circuit.add(Component::constant(3.0));
        let divider = Divider::with_upstream(0.5, source).unwrap();
        assert_eq!(divider.output_pin(&circuit).unwrap(), 6.0);
    }
}
