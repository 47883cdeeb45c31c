use super::{Health, Population};
use crate::{params::Params, prelude::Real};
use ndarray::Array2;
use rand::Rng;

/// Creates the initial population described by params.
///
/// Agents are placed uniformly at random in the simulation bounds and the first
/// `initial_infected` of them start infected.
pub fn new_population<R: Rng>(params: &Params, rng: &mut R) -> Population {
    new_population_in(
        params.initial_healthy(),
        params.initial_infected(),
        (params.width(), params.height()),
        rng,
    )
}

/// Creates a population with n_healthy + n_infected agents uniformly placed in
/// the `[0, width] x [0, height]` rectangle.
///
/// # Panics
///
/// If `n_healthy + n_infected` overflows. [`Params::validate`] rejects such
/// counts before a simulation is built.
pub fn new_population_in<R: Rng>(
    n_healthy: usize,
    n_infected: usize,
    (width, height): (Real, Real),
    rng: &mut R,
) -> Population {
    let n = n_healthy + n_infected;
    let bounds = [width, height];
    let positions = Array2::from_shape_fn((n, 2), |(_, k)| rng.gen::<Real>() * bounds[k]);
    let mut health = vec![Health::Healthy; n];
    for st in health.iter_mut().take(n_infected) {
        *st = Health::Infected;
    }
    Population::from_parts(positions, health)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn first_agents_start_infected() {
        let mut rng = SmallRng::seed_from_u64(1);
        let pop = new_population_in(7, 3, (10.0, 20.0), &mut rng);
        assert_eq!(pop.size(), 10);
        assert_eq!(pop.infected_indexes(), vec![0, 1, 2]);
        for ((x, y), _) in pop.iter() {
            assert!((0.0..=10.0).contains(&x));
            assert!((0.0..=20.0).contains(&y));
        }
    }

    #[test]
    fn reference_population() {
        let mut rng = SmallRng::seed_from_u64(1);
        let pop = new_population(&Params::reference(), &mut rng);
        assert_eq!(pop.count_by_state(), [900, 100]);
    }
}
