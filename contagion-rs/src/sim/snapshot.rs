use super::{Health, Population, StepStats};
use crate::prelude::Real;

/// Read-only view of the simulation handed to reporters after every step.
///
/// Step 0 is the initial population, before any step ran.
#[derive(Debug, Copy, Clone)]
pub struct Snapshot<'a> {
    pub step: usize,
    pub population: &'a Population,
    pub num_healthy: usize,
    pub num_infected: usize,
    pub stats: StepStats,
}

impl<'a> Snapshot<'a> {
    pub fn new(step: usize, population: &'a Population, stats: StepStats) -> Self {
        let [num_healthy, num_infected] = population.count_by_state();
        Snapshot {
            step,
            population,
            num_healthy,
            num_infected,
            stats,
        }
    }

    /// Agents as `((x, y), state)` pairs, in population order.
    pub fn points(&self) -> impl Iterator<Item = ((Real, Real), Health)> + 'a {
        self.population.iter()
    }

    pub fn size(&self) -> usize {
        self.population.size()
    }

    /// Counts in `Health::index()` order.
    pub fn counts(&self) -> [usize; Health::CARDINALITY] {
        [self.num_healthy, self.num_infected]
    }
}
