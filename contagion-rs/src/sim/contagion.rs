use super::{Health, Population};
use crate::{params::Params, prelude::Real};
use getset::{CopyGetters, Setters};
use log::trace;
use ndarray::{Array2, ArrayView2};
use rand::Rng;
use rayon::prelude::*;

/// Proximity based contagion.
///
/// A healthy agent is a contagion candidate when its distance to the closest
/// infected agent is strictly smaller than `radius`. Each candidate is then
/// infected with probability `prob`.
///
/// Distances are computed exhaustively between every infected agent and every
/// agent of the population. Candidates are evaluated from the states at the
/// start of the call, so agents infected by this pass do not spread the
/// disease until the next step.
#[derive(Debug, Copy, Clone, PartialEq, CopyGetters, Setters)]
pub struct ContagionDetector {
    #[getset(get_copy = "pub")]
    radius: Real,

    #[getset(get_copy = "pub")]
    prob: Real,

    /// Compute the distance pass with rayon. Random draws are unaffected.
    #[getset(get_copy = "pub", set = "pub")]
    parallel: bool,
}

impl ContagionDetector {
    /// # Panics
    ///
    /// If `radius` is negative or NaN, or if `prob` is not in `[0, 1]`.
    /// [`Params::validate`] rejects both before a simulation is built.
    pub fn new(radius: Real, prob: Real) -> Self {
        assert!(radius >= 0.0, "infection radius must be non-negative, got {}", radius);
        assert!(
            (0.0..=1.0).contains(&prob),
            "infection probability must be in [0, 1], got {}",
            prob
        );
        ContagionDetector {
            radius,
            prob,
            parallel: false,
        }
    }

    pub fn from_params(params: &Params) -> Self {
        Self::new(params.infection_radius(), params.infection_prob())
    }

    /// Mask of agents within `radius` of at least one infected agent.
    pub fn candidates(&self, pop: &Population) -> Vec<bool> {
        let sources = pop.select(&pop.infected_indexes());
        if sources.is_empty() {
            return vec![false; pop.size()];
        }
        min_distances(
            sources.positions().view(),
            pop.positions().view(),
            self.parallel,
        )
        .into_iter()
        .map(|d| d < self.radius)
        .collect()
    }

    /// Run contagion over the population and return the number of new cases.
    pub fn apply<R: Rng>(&self, pop: &mut Population, rng: &mut R) -> usize {
        if pop.n_infected() == 0 {
            return 0;
        }
        let candidates = self.candidates(pop);
        let mut cases = 0;
        for (i, &near) in candidates.iter().enumerate() {
            if near && pop.state(i).is_healthy() && rng.gen_bool(self.prob) {
                pop.set_state(i, Health::Infected);
                cases += 1;
            }
        }
        trace!(
            "contagion: {} candidates, {} new infections",
            candidates.iter().filter(|&&c| c).count(),
            cases
        );
        cases
    }
}

/// Euclidean distance between two points.
#[inline]
fn distance(ax: Real, ay: Real, bx: Real, by: Real) -> Real {
    let (dx, dy) = (ax - bx, ay - by);
    (dx * dx + dy * dy).sqrt()
}

/// Dense `(a.nrows(), b.nrows())` matrix of Euclidean distances between the
/// rows of two `(n, 2)` position matrices.
pub fn distance_matrix(a: ArrayView2<Real>, b: ArrayView2<Real>) -> Array2<Real> {
    Array2::from_shape_fn((a.nrows(), b.nrows()), |(i, j)| {
        distance(a[[i, 0]], a[[i, 1]], b[[j, 0]], b[[j, 1]])
    })
}

/// For every row of `targets`, the distance to the closest row of `sources`.
///
/// This is the column-wise minimum of `distance_matrix(sources, targets)`,
/// computed without materializing the matrix. Returns infinity for every
/// target when there are no sources.
pub fn min_distances(sources: ArrayView2<Real>, targets: ArrayView2<Real>, parallel: bool) -> Vec<Real> {
    let closest = |j: usize| {
        let (tx, ty) = (targets[[j, 0]], targets[[j, 1]]);
        sources
            .outer_iter()
            .map(|src| distance(src[0], src[1], tx, ty))
            .fold(Real::INFINITY, Real::min)
    };
    if parallel {
        (0..targets.nrows()).into_par_iter().map(closest).collect()
    } else {
        (0..targets.nrows()).map(closest).collect()
    }
}
