//! Spatial contagion among randomly moving agents that die and reproduce.
//!
//! Agents live in a rectangle, take gaussian random steps, and infect healthy
//! neighbours closer than a fixed radius. Infected agents may die and healthy
//! agents may spawn children at their own position, while the population is
//! kept under a hard cap. A run ends on overpopulation, on extinction, or when
//! an external observer asks it to stop.
//!
//! ```
//! use contagion::prelude::*;
//!
//! let mut params = Params::reference();
//! params.set_initial_healthy(90).set_initial_infected(10).set_max_people(120);
//! let mut sim = Simulation::with_seed(params, 42).unwrap();
//! let outcome = sim.run();
//! assert!(outcome.num_healthy + outcome.num_infected <= 120);
//! ```
pub mod error;
pub mod params;
pub mod prelude;
pub mod sim;
pub mod trackers;
pub mod utils;

pub use crate::error::ConfigError;
pub use crate::params::{CapPolicy, Params, StepStd};
pub use crate::sim::{Health, Outcome, Population, Simulation, StopReason};

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;
