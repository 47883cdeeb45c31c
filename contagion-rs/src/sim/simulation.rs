use super::{
    new_population, Engine, EpicurveTracker, GrowableReporter, Outcome, Population, Reporter,
    ReporterList, Snapshot, StepStats, StopReason, StopSignal,
};
use crate::{error::Result, params::Params};
use getset::{CopyGetters, Getters};
use log::{debug, info};
use rand::prelude::{SeedableRng, SmallRng};

/// Simulation stores a population of agents, the engine responsible for its
/// dynamics and the observers that watch it.
///
/// Each call to [`Simulation::step`] runs the full step pipeline and reports
/// a snapshot. The loop stops on overpopulation, on extinction or when a stop
/// is requested through a [`StopSignal`]; no other condition ends a run.
#[derive(Getters, CopyGetters)]
pub struct Simulation {
    #[getset(get = "pub")]
    params: Params,

    #[getset(get = "pub")]
    population: Population,

    #[getset(get = "pub")]
    engine: Engine,

    /// Counts recorded for the initial population and after every step.
    #[getset(get = "pub")]
    epicurve: EpicurveTracker,

    /// Number of steps executed so far.
    #[getset(get_copy = "pub")]
    n_iter: usize,

    #[getset(get_copy = "pub")]
    last_stats: StepStats,

    /// Set once the simulation has terminated.
    #[getset(get_copy = "pub")]
    outcome: Option<Outcome>,

    started: bool,
    reporters: ReporterList,
    stop: StopSignal,
    rng: SmallRng,
}

impl Simulation {
    /// Create a new simulation with a random initial population. Randomness is
    /// seeded from system entropy.
    pub fn new(params: Params) -> Result<Self> {
        Self::with_rng(params, SmallRng::from_entropy())
    }

    /// Create a new simulation whose initial population and dynamics are fully
    /// determined by seed.
    pub fn with_seed(params: Params, seed: u64) -> Result<Self> {
        Self::with_rng(params, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(params: Params, mut rng: SmallRng) -> Result<Self> {
        params.validate()?;
        let population = new_population(&params, &mut rng);
        Ok(Self::build(params, population, rng))
    }

    /// Create a simulation from an explicit initial population.
    pub fn from_population(params: Params, population: Population) -> Result<Self> {
        params.validate()?;
        Ok(Self::build(params, population, SmallRng::from_entropy()))
    }

    fn build(params: Params, population: Population, rng: SmallRng) -> Self {
        let mut epicurve = EpicurveTracker::new();
        epicurve.update(&population);
        info!(
            "new simulation: {} agents ({} infected), cap {}",
            population.size(),
            population.n_infected(),
            params.max_people()
        );
        Simulation {
            engine: Engine::new(&params),
            params,
            population,
            epicurve,
            n_iter: 0,
            last_stats: StepStats::default(),
            outcome: None,
            started: false,
            reporters: vec![],
            stop: StopSignal::new(),
            rng,
        }
    }

    /// Set seed for random number generator
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Use a copy of the given generator for all future draws.
    pub fn seed_from(&mut self, rng: &SmallRng) -> &mut Self {
        self.rng = rng.clone();
        self
    }

    /// Compute the distance pass of contagion in parallel.
    pub fn set_parallel(&mut self, parallel: bool) -> &mut Self {
        self.engine.contagion_mut().set_parallel(parallel);
        self
    }

    /// Register a reporter called every n_steps, starting with the snapshot
    /// of the initial population.
    pub fn register_reporter(&mut self, n_steps: usize, reporter: Box<dyn Reporter>) -> &mut Self {
        self.reporters.register_reporter(n_steps, reporter);
        self
    }

    /// Handle that external collaborators can use to stop the simulation.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Ask the simulation to stop before its next step.
    pub fn request_stop(&self) {
        self.stop.request()
    }

    pub fn num_healthy(&self) -> usize {
        self.population.n_healthy()
    }

    pub fn num_infected(&self) -> usize {
        self.population.n_infected()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Current snapshot of the simulation.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self.n_iter, &self.population, self.last_stats)
    }

    /// Run one step. Return the outcome if the simulation has terminated,
    /// either during this call or before it.
    pub fn step(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        if !self.started {
            self.started = true;
            let snapshot = Snapshot::new(0, &self.population, StepStats::default());
            self.reporters.process(&self.params, &snapshot);
        }
        if self.stop.is_requested() {
            return Some(self.finish(StopReason::UserRequested));
        }
        if self.population.is_empty() {
            return Some(self.finish(StopReason::Extinction));
        }

        let stats = self.engine.step(&mut self.population, &mut self.rng);
        self.n_iter += 1;
        self.last_stats = stats;

        let snapshot = Snapshot::new(self.n_iter, &self.population, stats);
        self.epicurve.process(&self.params, &snapshot);
        self.reporters.process(&self.params, &snapshot);
        debug!(
            "step [{}]: {} healthy, {} infected ({:?})",
            self.n_iter, snapshot.num_healthy, snapshot.num_infected, stats
        );

        if self.population.size() >= self.params.max_people() {
            return Some(self.finish(StopReason::Overpopulation));
        }
        if self.population.is_empty() {
            return Some(self.finish(StopReason::Extinction));
        }
        None
    }

    /// Run until the simulation terminates.
    pub fn run(&mut self) -> Outcome {
        loop {
            if let Some(outcome) = self.step() {
                return outcome;
            }
        }
    }

    /// Run at most n steps. Return the outcome if the simulation terminated.
    pub fn run_steps(&mut self, n: usize) -> Option<Outcome> {
        for _ in 0..n {
            if let Some(outcome) = self.step() {
                return Some(outcome);
            }
        }
        self.outcome
    }

    fn finish(&mut self, reason: StopReason) -> Outcome {
        let [num_healthy, num_infected] = self.population.count_by_state();
        let outcome = Outcome {
            reason,
            steps: self.n_iter,
            num_healthy,
            num_infected,
        };
        info!("simulation finished: {}", outcome);
        self.outcome = Some(outcome);
        self.reporters.finish(&outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ConfigError,
        params::StepStd,
        sim::Health::{self, *},
    };
    use std::{cell::RefCell, rc::Rc};

    fn params() -> Params {
        let mut params = Params::reference();
        params
            .set_width(100.0)
            .set_height(100.0)
            .set_initial_healthy(50)
            .set_initial_infected(5)
            .set_max_people(500)
            .set_infection_radius(5.0)
            .set_infection_prob(0.2)
            .set_step_std(StepStd::Scalar(2.0));
        params
    }

    #[test]
    fn invalid_params_are_rejected_before_running() {
        let mut params = params();
        params.set_infection_prob(2.0);
        assert!(matches!(
            Simulation::new(params),
            Err(ConfigError::InvalidProbability { .. })
        ));
        assert!(Simulation::from_population(params, Population::empty()).is_err());
    }

    #[test]
    fn overflowing_initial_population_is_a_config_error() {
        let mut params = params();
        params.set_initial_healthy(usize::MAX).set_initial_infected(1);
        assert!(matches!(
            Simulation::with_seed(params, 0),
            Err(ConfigError::PopulationOverflow { .. })
        ));
    }

    #[test]
    fn info_logs_survive_release_builds() {
        assert!(log::STATIC_MAX_LEVEL >= log::LevelFilter::Info);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = Simulation::with_seed(params(), 7).unwrap();
        let mut b = Simulation::with_seed(params(), 7).unwrap();
        a.run_steps(30);
        b.run_steps(30);
        assert_eq!(a.population(), b.population());
        assert_eq!(a.epicurve(), b.epicurve());
    }

    #[test]
    fn parallel_contagion_keeps_runs_reproducible() {
        let mut a = Simulation::with_seed(params(), 3).unwrap();
        let mut b = Simulation::with_seed(params(), 3).unwrap();
        b.set_parallel(true);
        a.run_steps(20);
        b.run_steps(20);
        assert_eq!(a.population(), b.population());
    }

    #[test]
    fn epicurve_tracks_every_step() {
        let mut sim = Simulation::with_seed(params(), 1).unwrap();
        assert_eq!(sim.epicurve().row(0), Some([50, 5]));
        sim.run_steps(10);
        assert_eq!(sim.epicurve().len(), sim.n_iter() + 1);
        assert_eq!(sim.epicurve().tip(), [sim.num_healthy(), sim.num_infected()]);
    }

    #[test]
    fn reporters_receive_initial_and_step_snapshots() {
        let seen: Rc<RefCell<Vec<(usize, usize)>>> = Rc::new(RefCell::new(vec![]));
        let finished = Rc::new(RefCell::new(None));

        struct Recorder {
            seen: Rc<RefCell<Vec<(usize, usize)>>>,
            finished: Rc<RefCell<Option<Outcome>>>,
        }
        impl Reporter for Recorder {
            fn process(&mut self, _: &Params, snapshot: &Snapshot) {
                assert_eq!(snapshot.points().count(), snapshot.size());
                self.seen.borrow_mut().push((snapshot.step, snapshot.size()));
            }
            fn finish(&mut self, outcome: &Outcome) {
                *self.finished.borrow_mut() = Some(*outcome);
            }
        }

        let mut sim = Simulation::with_seed(params(), 2).unwrap();
        sim.register_reporter(
            1,
            Box::new(Recorder {
                seen: seen.clone(),
                finished: finished.clone(),
            }),
        );
        sim.run_steps(3);
        sim.request_stop();
        let outcome = sim.run();

        let steps: Vec<usize> = seen.borrow().iter().map(|(s, _)| *s).collect();
        assert_eq!(steps, vec![0, 1, 2, 3]);
        assert_eq!(outcome.reason, StopReason::UserRequested);
        assert_eq!(outcome.steps, 3);
        assert_eq!(*finished.borrow(), Some(outcome));
    }

    #[test]
    fn finished_simulation_does_not_step() {
        let mut sim = Simulation::from_population(params(), Population::empty()).unwrap();
        let outcome = sim.run();
        assert_eq!(outcome.reason, StopReason::Extinction);
        assert_eq!(sim.step(), Some(outcome));
        assert_eq!(sim.n_iter(), 0);
        assert!(sim.is_finished());
    }

    #[test]
    fn counts_follow_population() {
        let pop = Population::from_points(vec![((1.0, 1.0), Healthy), ((2.0, 2.0), Infected)]);
        let sim = Simulation::from_population(params(), pop).unwrap();
        assert_eq!(sim.num_healthy(), 1);
        assert_eq!(sim.num_infected(), 1);
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.counts(), [1, 1]);
        assert_eq!(
            snapshot.points().map(|(_, st)| st).collect::<Vec<Health>>(),
            vec![Healthy, Infected]
        );
    }
}
