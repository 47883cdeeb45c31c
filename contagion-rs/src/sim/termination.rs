use serde::Serialize;
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

/// Why a simulation stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopReason {
    /// Population reached `max_people`.
    Overpopulation,
    /// No agent is left.
    Extinction,
    /// An external collaborator asked the loop to stop.
    UserRequested,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StopReason::Overpopulation => "OVERPOPULATION",
            StopReason::Extinction => "EXTINCTION",
            StopReason::UserRequested => "USER_REQUESTED",
        };
        f.write_str(name)
    }
}

/// Final report of a simulation run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub reason: StopReason,
    /// Number of steps executed.
    pub steps: usize,
    pub num_healthy: usize,
    pub num_infected: usize,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} steps (healthy: {}, infected: {})",
            self.reason, self.steps, self.num_healthy, self.num_infected
        )
    }
}

/// Cloneable handle used to ask a running simulation to stop.
///
/// The request is only observed at step boundaries.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the simulation to stop before its next step.
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
