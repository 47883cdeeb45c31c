//! This module declares the configuration of a contagion simulation.
//!
//! Every option is required: the engine assumes no implicit defaults for the
//! model itself. The only optional knob is the cap enforcement policy, which
//! falls back to the reference behavior of keeping the oldest agents.
mod step_std;

pub use step_std::*;

use crate::{
    error::{ConfigError, Result},
    prelude::Real,
};
use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// How the population is reduced when births push it above `max_people`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapPolicy {
    /// Keep the first `max_people` agents in population order. Newborns are
    /// appended at the end, so they are the first to be discarded.
    Truncate,
    /// Keep a uniformly random subset of `max_people` agents, preserving their
    /// relative order.
    Subsample,
}

impl Default for CapPolicy {
    fn default() -> Self {
        CapPolicy::Truncate
    }
}

/// Parameters of a contagion simulation.
#[derive(CopyGetters, Setters, Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[getset(get_copy = "pub", set = "pub")]
pub struct Params {
    /// Horizontal bound: x coordinates are clamped to [0, width].
    width: Real,

    /// Vertical bound: y coordinates are clamped to [0, height].
    height: Real,

    initial_healthy: usize,
    initial_infected: usize,

    /// Hard population cap.
    max_people: usize,

    /// Per-step probability that a healthy agent spawns a child.
    reproduction_prob: Real,

    /// Per-step probability that an infected agent dies.
    death_prob: Real,

    /// Strict distance threshold for contagion.
    infection_radius: Real,

    /// Probability that a healthy agent within the radius gets infected.
    infection_prob: Real,

    #[serde(default)]
    cap_policy: CapPolicy,

    /// Displacement scale. Kept last so that the per-state form serializes as
    /// a trailing TOML table.
    step_std: StepStd,
}

impl Params {
    /// Values used by the original contagion demo: a 1000x1000 world with 900
    /// healthy and 100 infected agents.
    pub fn reference() -> Self {
        Params {
            width: 1000.0,
            height: 1000.0,
            initial_healthy: 900,
            initial_infected: 100,
            max_people: 10_000,
            reproduction_prob: 0.01,
            death_prob: 0.01,
            infection_radius: 30.0,
            infection_prob: 0.02,
            cap_policy: CapPolicy::Truncate,
            step_std: StepStd::Scalar(5.0),
        }
    }

    /// Size of the initial population, saturating at `usize::MAX`.
    pub fn initial_population(&self) -> usize {
        self.initial_healthy.saturating_add(self.initial_infected)
    }

    /// Check all constraints that must hold before a simulation starts.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_people == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.initial_healthy.checked_add(self.initial_infected).is_none() {
            return Err(ConfigError::PopulationOverflow {
                healthy: self.initial_healthy,
                infected: self.initial_infected,
            });
        }
        if !(self.infection_radius >= 0.0) {
            return Err(ConfigError::InvalidRadius(self.infection_radius));
        }
        for &(name, value) in &[
            ("reproduction_prob", self.reproduction_prob),
            ("death_prob", self.death_prob),
            ("infection_prob", self.infection_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        let stds = match self.step_std {
            StepStd::Scalar(v) => vec![("step_std", v)],
            StepStd::PerState { healthy, infected } => vec![
                ("step_std.healthy", healthy),
                ("step_std.infected", infected),
            ],
        };
        for (name, value) in stds {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidStepStd { name, value });
            }
        }
        Ok(())
    }

    /// Parse and validate parameters from a TOML document.
    pub fn from_toml_str(data: &str) -> Result<Self> {
        let params: Params = toml::from_str(data)?;
        params.validate()?;
        Ok(params)
    }

    /// Read and validate parameters from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    /// Render parameters as a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
