use crate::{prelude::Real, sim::Health};
use serde::{Deserialize, Serialize};

/// Simple trait for values that may depend on the health state of an agent.
pub trait ForState<T> {
    /// Return the content of parameter for agents in the given state.
    fn for_state(&self, state: Health) -> T;
}

impl ForState<Real> for Real {
    fn for_state(&self, _state: Health) -> Real {
        *self
    }
}

/// Standard deviation of the per-step displacement.
///
/// Either a scalar shared by every agent or a pair of values selected by the
/// agent's current health state. In TOML this reads as `step_std = 5.0` or
/// `step_std = { healthy = 5.0, infected = 2.0 }`.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepStd {
    Scalar(Real),
    PerState { healthy: Real, infected: Real },
}

impl StepStd {
    /// Values in health index order.
    pub fn as_array(&self) -> [Real; Health::CARDINALITY] {
        let mut out = [0.0; Health::CARDINALITY];
        for st in Health::ALL.iter() {
            out[st.index()] = self.for_state(*st);
        }
        out
    }
}

impl ForState<Real> for StepStd {
    fn for_state(&self, state: Health) -> Real {
        match *self {
            StepStd::Scalar(v) => v,
            StepStd::PerState { healthy, infected } => match state {
                Health::Healthy => healthy,
                Health::Infected => infected,
            },
        }
    }
}

impl From<Real> for StepStd {
    fn from(value: Real) -> Self {
        StepStd::Scalar(value)
    }
}
