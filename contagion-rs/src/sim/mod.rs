//! The simulation core: population storage, the step pipeline and the loop
//! that drives it.
mod builder;
mod cap;
mod contagion;
mod engine;
mod epicurve_tracker;
mod motion;
mod population;
mod reporter;
mod simulation;
mod snapshot;
mod state;
mod termination;
mod vital;

pub use builder::*;
pub use cap::*;
pub use contagion::*;
pub use engine::*;
pub use epicurve_tracker::*;
pub use motion::*;
pub use population::*;
pub use reporter::*;
pub use simulation::*;
pub use snapshot::*;
pub use state::*;
pub use termination::*;
pub use vital::*;
