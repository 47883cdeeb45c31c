use super::{Health, Population};
use crate::{params::Params, prelude::Real};
use getset::CopyGetters;
use rand::Rng;

/// Stochastic deaths of infected agents and births of healthy ones.
#[derive(Debug, Copy, Clone, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct VitalEvents {
    death_prob: Real,
    reproduction_prob: Real,
    max_people: usize,
}

impl VitalEvents {
    /// # Panics
    ///
    /// If either probability is not in `[0, 1]`. [`Params::validate`] rejects
    /// such values before a simulation is built.
    pub fn new(death_prob: Real, reproduction_prob: Real, max_people: usize) -> Self {
        for &(name, p) in &[("death", death_prob), ("reproduction", reproduction_prob)] {
            assert!(
                (0.0..=1.0).contains(&p),
                "{} probability must be in [0, 1], got {}",
                name,
                p
            );
        }
        VitalEvents {
            death_prob,
            reproduction_prob,
            max_people,
        }
    }

    pub fn from_params(params: &Params) -> Self {
        Self::new(
            params.death_prob(),
            params.reproduction_prob(),
            params.max_people(),
        )
    }

    /// Remove each infected agent with probability `death_prob`. Return the
    /// number of deaths.
    pub fn apply_deaths<R: Rng>(&self, pop: &mut Population, rng: &mut R) -> usize {
        let survivors: Vec<bool> = pop
            .health()
            .iter()
            .map(|st| !(st.is_infected() && rng.gen_bool(self.death_prob)))
            .collect();
        let deaths = survivors.iter().filter(|&&alive| !alive).count();
        if deaths > 0 {
            *pop = pop.filter(&survivors);
        }
        deaths
    }

    /// Each healthy agent spawns a healthy child at its own position with
    /// probability `reproduction_prob`. Children are appended after all
    /// existing agents. Nothing happens if the population is already at or
    /// above the cap. Return the number of births.
    pub fn apply_births<R: Rng>(&self, pop: &mut Population, rng: &mut R) -> usize {
        if pop.size() >= self.max_people {
            return 0;
        }
        let parents: Vec<bool> = pop
            .health()
            .iter()
            .map(|st| st.is_healthy() && rng.gen_bool(self.reproduction_prob))
            .collect();
        let children = pop.filter(&parents);
        debug_assert!(children.health().iter().all(|&st| st == Health::Healthy));
        let births = children.size();
        if births > 0 {
            *pop = pop.concat(&children);
        }
        births
    }
}
