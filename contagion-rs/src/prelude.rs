pub use crate::error::ConfigError;
pub use crate::params::{CapPolicy, ForState, Params, StepStd};
pub use crate::sim::{
    Engine, EpicurveTracker, GrowableReporter, Health, Outcome, Population, Reporter, Snapshot,
    Simulation, StepStats, StopReason, StopSignal,
};
pub use crate::trackers::{Throttle, Ticks};
pub use crate::Real;
