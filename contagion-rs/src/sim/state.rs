use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary health condition carried by every agent.
///
/// Like the compartments of classical epidemic models, each state maps to a
/// stable integer index so that per-state counters can be stored in plain
/// arrays of size [`Health::CARDINALITY`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Infected,
}

impl Health {
    /// Number of distinct health states.
    pub const CARDINALITY: usize = 2;

    /// Column names used when rendering per-state counts as CSV.
    pub const CSV_HEADER: &'static str = "healthy,infected";

    /// All states, in index order.
    pub const ALL: [Health; 2] = [Health::Healthy, Health::Infected];

    /// Index associated with the state: healthy => 0, infected => 1.
    pub fn index(&self) -> usize {
        match self {
            Health::Healthy => 0,
            Health::Infected => 1,
        }
    }

    pub fn is_healthy(&self) -> bool {
        *self == Health::Healthy
    }

    pub fn is_infected(&self) -> bool {
        *self == Health::Infected
    }
}

impl Default for Health {
    fn default() -> Self {
        Health::Healthy
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Health::Healthy => write!(f, "H"),
            Health::Infected => write!(f, "I"),
        }
    }
}
