use super::{Health, Population};
use crate::{
    params::{Params, StepStd},
    prelude::Real,
};
use getset::CopyGetters;
use ndarray::Array2;
use rand::Rng;
use rand_distr::StandardNormal;

/// Random walk with hard walls.
///
/// Every step each agent receives an independent gaussian displacement in both
/// axes, with a standard deviation that may depend on its health state. The
/// new coordinates are then clamped to the simulation bounds (no bounce, no
/// wraparound).
#[derive(Debug, Copy, Clone, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct MotionModel {
    step_std: StepStd,
    width: Real,
    height: Real,
}

impl MotionModel {
    pub fn new(step_std: StepStd, (width, height): (Real, Real)) -> Self {
        MotionModel {
            step_std,
            width,
            height,
        }
    }

    pub fn from_params(params: &Params) -> Self {
        Self::new(params.step_std(), (params.width(), params.height()))
    }

    /// Draw a `(n, 2)` matrix of displacements for the given population.
    pub fn displacements<R: Rng>(&self, pop: &Population, rng: &mut R) -> Array2<Real> {
        let stds = self.step_std.as_array();
        let health = pop.health();
        Array2::from_shape_fn((pop.size(), 2), |(i, _)| {
            let z: Real = rng.sample(StandardNormal);
            stds[health[i].index()] * z
        })
    }

    /// Move all agents and clamp them back into the bounds.
    pub fn apply<R: Rng>(&self, pop: &mut Population, rng: &mut R) {
        if pop.is_empty() {
            return;
        }
        let delta = self.displacements(pop, rng);
        *pop.positions_mut() += &delta;
        self.clamp(pop);
    }

    /// Clamp every coordinate to `[0, width]` and `[0, height]`.
    pub fn clamp(&self, pop: &mut Population) {
        let (width, height) = (self.width, self.height);
        let positions = pop.positions_mut();
        positions.column_mut(0).mapv_inplace(|x| x.clamp(0.0, width));
        positions.column_mut(1).mapv_inplace(|y| y.clamp(0.0, height));
    }

    /// Standard deviation used for agents in the given state.
    pub fn std_for(&self, state: Health) -> Real {
        self.step_std.as_array()[state.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::SmallRng, SeedableRng};
    use crate::sim::Health::*;

    #[test]
    fn clamp_is_a_hard_wall() {
        let motion = MotionModel::new(StepStd::Scalar(1.0), (10.0, 5.0));
        let mut pop = Population::from_points(vec![
            ((-3.0, 2.0), Healthy),
            ((12.0, 7.0), Infected),
            ((4.0, -0.5), Healthy),
        ]);
        motion.clamp(&mut pop);
        assert_eq!(pop.position(0), (0.0, 2.0));
        assert_eq!(pop.position(1), (10.0, 5.0));
        assert_eq!(pop.position(2), (4.0, 0.0));
    }

    #[test]
    fn zero_std_does_not_move() {
        let motion = MotionModel::new(StepStd::Scalar(0.0), (10.0, 10.0));
        let mut pop = Population::from_points(vec![((1.0, 2.0), Healthy), ((3.0, 4.0), Infected)]);
        let mut rng = SmallRng::seed_from_u64(0);
        motion.apply(&mut pop, &mut rng);
        assert_eq!(pop.position(0), (1.0, 2.0));
        assert_eq!(pop.position(1), (3.0, 4.0));
    }

    #[test]
    fn per_state_std_moves_only_selected_state() {
        let std = StepStd::PerState {
            healthy: 0.0,
            infected: 2.0,
        };
        let motion = MotionModel::new(std, (1000.0, 1000.0));
        assert_eq!(motion.std_for(Infected), 2.0);

        let mut pop = Population::from_points(vec![((500.0, 500.0), Healthy), ((500.0, 500.0), Infected)]);
        let mut rng = SmallRng::seed_from_u64(3);
        motion.apply(&mut pop, &mut rng);
        assert_eq!(pop.position(0), (500.0, 500.0));
        assert_ne!(pop.position(1), (500.0, 500.0));
    }

    #[test]
    fn displacement_has_requested_scale() {
        let motion = MotionModel::new(StepStd::Scalar(5.0), (1.0, 1.0));
        let pop = Population::from_points(vec![((0.0, 0.0), Healthy); 20_000]);
        let mut rng = SmallRng::seed_from_u64(42);
        let delta = motion.displacements(&pop, &mut rng);
        let n = delta.len() as Real;
        let mean = delta.sum() / n;
        let var = delta.mapv(|x| x * x).sum() / n - mean * mean;
        assert_approx_eq!(mean, 0.0, 0.1);
        assert_approx_eq!(var.sqrt(), 5.0, 0.1);
    }
}
