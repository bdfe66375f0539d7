// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Multiplexer with its prescaler branches.
//!
//! A multiplexer has a single input. Every prescaler branch reads that same
//! input, and the selected branch's value is forwarded to the output.
//! [`Multiplexer::set_upstream`] is the only way to change the input, and it
//! rewires all branches at once so they never diverge from their parent.

use super::{Circuit, ComponentError, ComponentId, Divider, OutputPin};

/// A multiplexer choosing between prescaler branches.
#[derive(Debug, Clone, PartialEq)]
pub struct Multiplexer {
    prescalers: Vec<Divider>,
    input: Option<ComponentId>,
    selected: usize,
}

impl Multiplexer {
    /// Create a multiplexer from its prescalers, optionally connected to `upstream`.
    ///
    /// Whatever upstream the prescalers carried is replaced by the
    /// multiplexer's own. Fails with [`ComponentError::NoPrescalers`] if
    /// `prescalers` is empty.
    pub fn new(
        prescalers: Vec<Divider>,
        upstream: Option<ComponentId>,
    ) -> Result<Self, ComponentError> {
        if prescalers.is_empty() {
            return Err(ComponentError::NoPrescalers);
        }
        let mut mux = Self {
            prescalers,
            input: upstream,
            selected: 0,
        };
        mux.setup_prescalers();
        Ok(mux)
    }

    /// Prescalers increasing exponentially.
    ///
    /// Example: n=4 gives prescalers 1, 2, 4, 8.
    pub fn exponent_over_two(
        n: usize,
        upstream: Option<ComponentId>,
    ) -> Result<Self, ComponentError> {
        let prescalers = (0..n)
            .map(|x| Divider::new(2f64.powi(x as i32)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(prescalers, upstream)
    }

    /// Prescalers increasing by one.
    ///
    /// Example: n=4 gives prescalers 1, 2, 3, 4.
    pub fn increment_one(n: usize, upstream: Option<ComponentId>) -> Result<Self, ComponentError> {
        let prescalers = (1..=n)
            .map(|x| Divider::new(x as f64))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(prescalers, upstream)
    }

    /// Connect the multiplexer, and every prescaler with it, to `upstream`.
    pub fn set_upstream(&mut self, upstream: ComponentId) {
        self.input = Some(upstream);
        self.setup_prescalers();
    }

    /// Push the multiplexer's input down to each prescaler.
    fn setup_prescalers(&mut self) {
        for prescaler in &mut self.prescalers {
            prescaler.set_input(self.input);
        }
    }

    /// Select the active input. Not bounds checked here; an out-of-range
    /// selection is reported when the output is read.
    pub fn select(&mut self, index: usize) {
        self.selected = index;
    }

    /// The active input.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Number of prescaler branches.
    pub fn input_count(&self) -> usize {
        self.prescalers.len()
    }

    pub fn upstream(&self) -> Option<ComponentId> {
        self.input
    }

    pub fn prescalers(&self) -> &[Divider] {
        &self.prescalers
    }

    /// Ratio of branch `index`, if it exists.
    pub fn divisor(&self, index: usize) -> Option<f64> {
        self.prescalers.get(index).map(Divider::divide_by)
    }

    pub fn divisors(&self) -> Vec<f64> {
        self.prescalers.iter().map(Divider::divide_by).collect()
    }
}

impl OutputPin for Multiplexer {
    fn output_pin(&self, circuit: &Circuit) -> Result<f64, ComponentError> {
        if self.input.is_none() {
            return Err(ComponentError::UnconfiguredUpstream {
                kind: "Multiplexer",
            });
        }
        self.prescalers
            .get(self.selected)
            .ok_or(ComponentError::IndexOutOfRange {
                index: self.selected,
                count: self.prescalers.len(),
            })?
            .output_pin(circuit)
    }
}
