//! Error types for the contagion crate.
//!
//! The simulation core itself never fails once it has been built from valid
//! parameters, so all errors describe bad configuration or problems reading it.

use crate::prelude::Real;
use thiserror::Error;

/// Errors reported before any simulation step runs.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A probability outside of the closed interval [0, 1].
    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: Real },

    /// Simulation bounds must be finite and strictly positive.
    #[error("bounds must be finite and positive, got {width} x {height}")]
    InvalidBounds { width: Real, height: Real },

    /// The population cap must allow at least one agent.
    #[error("max_people must be at least 1")]
    ZeroCapacity,

    /// The initial population does not fit in a `usize`.
    #[error("initial population overflows: {healthy} healthy + {infected} infected")]
    PopulationOverflow { healthy: usize, infected: usize },

    /// Contagion radius must be non-negative. An infinite radius is allowed.
    #[error("infection_radius must be non-negative, got {0}")]
    InvalidRadius(Real),

    /// Displacement standard deviations must be finite and non-negative.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidStepStd { name: &'static str, value: Real },

    /// Malformed TOML configuration.
    #[error("could not parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be rendered back to TOML.
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Configuration file could not be read or written.
    #[error("configuration file error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
