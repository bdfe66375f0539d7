// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Clock-tree components.
//!
//! Every component has exactly one output pin and at most one input. Values
//! are pulled: reading a component's output recursively reads its upstream.
//!
//! Components live in a [`Circuit`], which owns them and hands out
//! [`ComponentId`] handles. Upstream links are handles, not references, so a
//! multiplexer can be rewired without any aliasing between components.
//!
//! ## Module Structure
//!
//! - `divider`: [`Divider`] prescaler
//! - `multiplexer`: [`Multiplexer`] and its prescaler factories
//! - `errors`: [`ComponentError`]

pub mod divider;
pub mod errors;
pub mod multiplexer;

pub use divider::Divider;
pub use errors::ComponentError;
pub use multiplexer::Multiplexer;

use std::fmt;

/// Handle of a component within a [`Circuit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Get the handle as a usize (for array indexing).
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The single output pin every component exposes.
pub trait OutputPin {
    /// Read the component's output value, pulling through its upstream in `circuit`.
    fn output_pin(&self, circuit: &Circuit) -> Result<f64, ComponentError>;
}

/// A constant value. Used as the input pin of the simulated circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl OutputPin for Constant {
    fn output_pin(&self, _circuit: &Circuit) -> Result<f64, ComponentError> {
        Ok(self.value)
    }
}

/// Any component that can be placed in a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Constant(Constant),
    Divider(Divider),
    Multiplexer(Multiplexer),
}

impl Component {
    pub fn constant(value: f64) -> Self {
        Component::Constant(Constant::new(value))
    }

    /// Short name of the variant, used in log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Component::Constant(_) => "Constant",
            Component::Divider(_) => "Divider",
            Component::Multiplexer(_) => "Multiplexer",
        }
    }

    /// The upstream handle, if this component has an input and it is set.
    pub fn upstream(&self) -> Option<ComponentId> {
        match self {
            Component::Constant(_) => None,
            Component::Divider(divider) => divider.upstream(),
            Component::Multiplexer(mux) => mux.upstream(),
        }
    }
}

impl OutputPin for Component {
    fn output_pin(&self, circuit: &Circuit) -> Result<f64, ComponentError> {
        match self {
            Component::Constant(constant) => constant.output_pin(circuit),
            Component::Divider(divider) => divider.output_pin(circuit),
            Component::Multiplexer(mux) => mux.output_pin(circuit),
        }
    }
}

impl From<Divider> for Component {
    fn from(divider: Divider) -> Self {
        Component::Divider(divider)
    }
}

impl From<Multiplexer> for Component {
    fn from(mux: Multiplexer) -> Self {
        Component::Multiplexer(mux)
    }
}

/// Arena owning every component of a clock tree.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    components: Vec<Component>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component, returning its handle.
    pub fn add(&mut self, component: impl Into<Component>) -> ComponentId {
        let id = ComponentId(self.components.len());
        self.components.push(component.into());
        id
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, id: ComponentId) -> Result<&Component, ComponentError> {
        self.components
            .get(id.0)
            .ok_or(ComponentError::UnknownComponent(id))
    }

    pub fn multiplexer(&self, id: ComponentId) -> Result<&Multiplexer, ComponentError> {
        match self.get(id)? {
            Component::Multiplexer(mux) => Ok(mux),
            _ => Err(ComponentError::NotAMultiplexer(id)),
        }
    }

    pub fn multiplexer_mut(&mut self, id: ComponentId) -> Result<&mut Multiplexer, ComponentError> {
        match self.components.get_mut(id.0) {
            Some(Component::Multiplexer(mux)) => Ok(mux),
            Some(_) => Err(ComponentError::NotAMultiplexer(id)),
            None => Err(ComponentError::UnknownComponent(id)),
        }
    }

    /// Read the output pin of component `id`.
    pub fn output_pin(&self, id: ComponentId) -> Result<f64, ComponentError> {
        self.get(id)?.output_pin(self)
    }

    /// Set the upstream of `component` to `upstream`.
    ///
    /// Multiplexers propagate the new upstream to all of their prescalers.
    /// Links that would lead back to `component` are rejected, so reading any
    /// output always terminates.
    pub fn connect(
        &mut self,
        component: ComponentId,
        upstream: ComponentId,
    ) -> Result<(), ComponentError> {
        self.get(upstream)?;
        if self.reaches(upstream, component)? {
            return Err(ComponentError::CyclicConnection {
                component,
                upstream,
            });
        }
        match self.components.get_mut(component.0) {
            Some(Component::Constant(_)) => Err(ComponentError::NoInputPin(component)),
            Some(Component::Divider(divider)) => {
                divider.set_upstream(upstream);
                Ok(())
            }
            Some(Component::Multiplexer(mux)) => {
                mux.set_upstream(upstream);
                Ok(())
            }
            None => Err(ComponentError::UnknownComponent(component)),
        }
    }

    /// Whether following upstream links from `from` arrives at `target`.
    fn reaches(&self, from: ComponentId, target: ComponentId) -> Result<bool, ComponentError> {
        let mut current = Some(from);
        let mut steps = 0;
        while let Some(id) = current {
            if id == target {
                return Ok(true);
            }
            // Existing links are acyclic, so a walk longer than the arena is impossible.
            steps += 1;
            if steps > self.components.len() {
                break;
            }
            current = self.get(id)?.upstream();
        }
        Ok(false)
    }
}
