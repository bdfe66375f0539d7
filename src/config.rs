// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Clock-tree description, serialized as JSON.
//!
//! ```json
//! {
//!   "bus_frequency": 16.0,
//!   "required_clock": 1.0,
//!   "stages": [
//!     { "rule": "exponent_over_two", "inputs": 5 },
//!     { "rule": "increment_one", "inputs": 5 }
//!   ]
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::component::Multiplexer;
use crate::solver::{ClockSolver, SolverError};

/// Errors that can occur while loading a clock-tree description.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid clock-tree description: {0}")]
    Json(#[from] serde_json::Error),

    /// A stage given as text was not `rule:inputs`.
    #[error("invalid stage '{0}', expected <rule>:<inputs> with rule exponent_over_two (exp) or increment_one (inc)")]
    InvalidStage(String),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// How a multiplexer's prescaler ratios are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescalerRule {
    /// 1, 2, 4, ..., 2^(n-1)
    ExponentOverTwo,
    /// 1, 2, 3, ..., n
    IncrementOne,
}

impl PrescalerRule {
    fn name(self) -> &'static str {
        match self {
            PrescalerRule::ExponentOverTwo => "exponent_over_two",
            PrescalerRule::IncrementOne => "increment_one",
        }
    }
}

/// One multiplexer stage: a prescaler rule and its number of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    pub rule: PrescalerRule,
    pub inputs: usize,
}

impl StageConfig {
    pub fn new(rule: PrescalerRule, inputs: usize) -> Self {
        Self { rule, inputs }
    }

    /// Build the (unconnected) multiplexer this stage describes.
    pub fn build(&self) -> Result<Multiplexer, SolverError> {
        let mux = match self.rule {
            PrescalerRule::ExponentOverTwo => Multiplexer::exponent_over_two(self.inputs, None)?,
            PrescalerRule::IncrementOne => Multiplexer::increment_one(self.inputs, None)?,
        };
        Ok(mux)
    }
}

impl fmt::Display for StageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.rule.name(), self.inputs)
    }
}

/// Parses `rule:inputs`, e.g. `exponent_over_two:5` or `inc:3`.
impl FromStr for StageConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidStage(s.to_string());
        let (rule, inputs) = s.split_once(':').ok_or_else(invalid)?;
        let rule = match rule.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "exponent_over_two" | "exp" => PrescalerRule::ExponentOverTwo,
            "increment_one" | "inc" => PrescalerRule::IncrementOne,
            _ => return Err(invalid()),
        };
        let inputs = inputs.trim().parse().map_err(|_| invalid())?;
        Ok(Self { rule, inputs })
    }
}

/// Everything needed to run a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockTreeConfig {
    /// Input clock frequency.
    pub bus_frequency: f64,
    /// Target clock frequency.
    pub required_clock: f64,
    /// Multiplexer stages, in chain order.
    pub stages: Vec<StageConfig>,
}

impl Default for ClockTreeConfig {
    fn default() -> Self {
        Self {
            bus_frequency: 16.0,
            required_clock: 1.0,
            stages: vec![
                StageConfig::new(PrescalerRule::ExponentOverTwo, 5),
                StageConfig::new(PrescalerRule::IncrementOne, 5),
            ],
        }
    }
}

impl ClockTreeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the multiplexers and wire them into a solver.
    pub fn build_solver(&self) -> Result<ClockSolver, ConfigError> {
        let multiplexers = self
            .stages
            .iter()
            .map(StageConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ClockSolver::new(
            self.bus_frequency,
            self.required_clock,
            multiplexers,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentError;

    #[test]
    fn test_parse_stage() {
        assert_eq!(
            "exponent_over_two:5".parse::<StageConfig>().unwrap(),
            StageConfig::new(PrescalerRule::ExponentOverTwo, 5)
        );
        assert_eq!(
            "inc:3".parse::<StageConfig>().unwrap(),
            StageConfig::new(PrescalerRule::IncrementOne, 3)
        );
        assert_eq!(
            "Increment-One: 2".parse::<StageConfig>().unwrap(),
            StageConfig::new(PrescalerRule::IncrementOne, 2)
        );
        assert!("exp".parse::<StageConfig>().is_err());
        assert!("square:4".parse::<StageConfig>().is_err());
        assert!("exp:-1".parse::<StageConfig>().is_err());
    }

    #[test]
    fn test_stage_display_parses_back() {
        let stage = StageConfig::new(PrescalerRule::ExponentOverTwo, 7);
        assert_eq!(stage.to_string(), "exponent_over_two:7");
        assert_eq!(stage.to_string().parse::<StageConfig>().unwrap(), stage);
    }

    #[test]
    fn test_json_format() {
        let json = r#"{
            "bus_frequency": 16.0,
            "required_clock": 1.0,
            "stages": [
                { "rule": "exponent_over_two", "inputs": 5 },
                { "rule": "increment_one", "inputs": 5 }
            ]
        }"#;
        assert_eq!(
            ClockTreeConfig::from_json_str(json).unwrap(),
            ClockTreeConfig::default()
        );
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let json = r#"{"bus_frequency": 1.0, "required_clock": 1.0,
                       "stages": [{"rule": "squares", "inputs": 2}]}"#;
        assert!(matches!(
            ClockTreeConfig::from_json_str(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_build_solver_errors() {
        let mut config = ClockTreeConfig::default();
        config.stages[1].inputs = 0;
        assert!(matches!(
            config.build_solver(),
            Err(ConfigError::Solver(SolverError::Component(
                ComponentError::NoPrescalers
            )))
        ));

        config.stages.clear();
        assert!(matches!(
            config.build_solver(),
            Err(ConfigError::Solver(SolverError::EmptyChain))
        ));
    }
}
