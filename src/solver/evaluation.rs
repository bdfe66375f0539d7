// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Configurations and their evaluations.

use std::fmt;
use std::ops::Index;

/// One selected input per multiplexer stage, in stage order (0-indexed).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Configuration(Vec<usize>);

impl Configuration {
    pub fn new(selection: Vec<usize>) -> Self {
        Self(selection)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }
}

impl From<Vec<usize>> for Configuration {
    fn from(selection: Vec<usize>) -> Self {
        Self(selection)
    }
}

impl Index<usize> for Configuration {
    type Output = usize;

    fn index(&self, stage: usize) -> &usize {
        &self.0[stage]
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, ")")
    }
}

/// The output of the last multiplexer when a configuration is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    configuration: Configuration,
    output: f64,
}

impl Evaluation {
    pub fn new(configuration: Configuration, output: f64) -> Self {
        Self {
            configuration,
            output,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The achieved frequency.
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Distance between the achieved frequency and `required_clock`.
    pub fn delta(&self, required_clock: f64) -> f64 {
        (required_clock - self.output).abs()
    }
}

/// Stage and input numbers are 1-indexed for humans.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, active_index) in self.configuration.iter().enumerate() {
            writeln!(f, "Multiplexer {} active input {}", i + 1, active_index + 1)?;
        }
        writeln!(f, "Achieved frequency: {}", self.output)
    }
}
