use super::{CapEnforcer, ContagionDetector, MotionModel, Population, VitalEvents};
use crate::params::Params;
use getset::{Getters, MutGetters};
use log::trace;
use rand::Rng;
use serde::Serialize;

/// Number of events of each kind that happened during a single step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StepStats {
    pub new_infections: usize,
    pub deaths: usize,
    pub births: usize,
    pub culled: usize,
}

/// The per-step pipeline.
///
/// A step is `motion -> contagion -> deaths -> births -> cap`, applied in this
/// order over the whole population. The engine holds no random state: every
/// draw comes from the generator passed to [`Engine::step`].
#[derive(Debug, Copy, Clone, PartialEq, Getters, MutGetters)]
#[getset(get = "pub", get_mut = "pub")]
pub struct Engine {
    motion: MotionModel,
    contagion: ContagionDetector,
    vital: VitalEvents,
    cap: CapEnforcer,
}

impl Engine {
    pub fn new(params: &Params) -> Self {
        Engine {
            motion: MotionModel::from_params(params),
            contagion: ContagionDetector::from_params(params),
            vital: VitalEvents::from_params(params),
            cap: CapEnforcer::from_params(params),
        }
    }

    /// Advance population by one step.
    pub fn step<R: Rng>(&self, pop: &mut Population, rng: &mut R) -> StepStats {
        self.motion.apply(pop, rng);
        let new_infections = self.contagion.apply(pop, rng);
        let deaths = self.vital.apply_deaths(pop, rng);
        let births = self.vital.apply_births(pop, rng);
        let culled = self.cap.apply(pop, rng);
        let stats = StepStats {
            new_infections,
            deaths,
            births,
            culled,
        };
        trace!("step stats: {:?}", stats);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{params::StepStd, sim::Health::*};
    use rand::{rngs::SmallRng, SeedableRng};

    fn still_params() -> Params {
        let mut params = Params::reference();
        params
            .set_step_std(StepStd::Scalar(0.0))
            .set_reproduction_prob(0.0)
            .set_death_prob(0.0)
            .set_infection_prob(0.0);
        params
    }

    #[test]
    fn contagion_then_death_in_same_step() {
        // A freshly infected agent is exposed to the death trial of the same
        // step.
        let mut params = still_params();
        params
            .set_infection_radius(10.0)
            .set_infection_prob(1.0)
            .set_death_prob(1.0);
        let engine = Engine::new(&params);
        let mut pop = Population::from_points(vec![((0.0, 0.0), Infected), ((1.0, 0.0), Healthy)]);
        let stats = engine.step(&mut pop, &mut SmallRng::seed_from_u64(0));
        assert_eq!(stats.new_infections, 1);
        assert_eq!(stats.deaths, 2);
        assert!(pop.is_empty());
    }

    #[test]
    fn births_are_culled_by_cap() {
        let mut params = still_params();
        params.set_max_people(3).set_reproduction_prob(1.0);
        let engine = Engine::new(&params);
        let mut pop = Population::from_points(vec![((0.0, 0.0), Healthy), ((1.0, 0.0), Healthy)]);
        let stats = engine.step(&mut pop, &mut SmallRng::seed_from_u64(0));
        assert_eq!(stats.births, 2);
        assert_eq!(stats.culled, 1);
        assert_eq!(pop.size(), 3);
        assert_eq!(pop.position(2), (0.0, 0.0));
    }

    #[test]
    fn oversized_population_is_capped_without_births() {
        let mut params = still_params();
        params.set_max_people(2);
        let engine = Engine::new(&params);
        let mut pop = Population::from_points(vec![((0.0, 0.0), Healthy); 4]);
        let stats = engine.step(&mut pop, &mut SmallRng::seed_from_u64(0));
        assert_eq!(stats.births, 0);
        assert_eq!(stats.culled, 2);
        assert_eq!(pop.size(), 2);
    }
}
