use std::{env, fs, path::Path};

use anyhow::Context;
use contagion::prelude::*;
use log::{info, warn, LevelFilter};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    /// Ask the simulation to stop after this many steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    max_steps: Option<usize>,
    /// Pace the loop to at most this many steps per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    target_fps: Option<Real>,
    log_every: usize,
    parallel: bool,
    verbose: bool,
    epicurve_csv: String,
    params: Params,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            max_steps: None,
            target_fps: None,
            log_every: 100,
            parallel: true,
            verbose: false,
            epicurve_csv: "epicurve.csv".to_string(),
            params: Params::reference(),
        }
    }
}

impl Config {
    /// Read config from path. A missing file is created with the reference
    /// configuration.
    pub fn load_or_create(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            let default = Config::default();
            fs::write(path, toml::to_string(&default)?)
                .with_context(|| format!("could not write {}", path))?;
            warn!("{} not found, created it with the reference configuration", path);
            return Ok(default);
        }
        let data = fs::read_to_string(path).with_context(|| format!("could not read {}", path))?;
        let cfg: Config = toml::from_str(&data).with_context(|| format!("invalid config {}", path))?;
        cfg.params.validate()?;
        Ok(cfg)
    }
}

/// Logs progress every few steps and the mean step time at the end.
struct Progress {
    every: usize,
    ticks: Ticks,
}

impl Reporter for Progress {
    fn process(&mut self, _params: &Params, snapshot: &Snapshot) {
        self.ticks.tick();
        if self.every > 0 && snapshot.step % self.every == 0 {
            info!(
                "step [{}]: {} healthy, {} infected, {} new cases",
                snapshot.step, snapshot.num_healthy, snapshot.num_infected, snapshot.stats.new_infections
            );
        }
    }

    fn finish(&mut self, outcome: &Outcome) {
        info!(
            "{} steps, mean step time {:.3} ms",
            outcome.steps,
            1e3 * self.ticks.mean_secs()
        );
    }
}

pub fn main() -> anyhow::Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let path = env::args().nth(1).unwrap_or_else(|| "conf.toml".to_string());
    let cfg = Config::load_or_create(&path)?;
    if cfg.verbose {
        println!("{:#?}", cfg);
    }

    let mut sim = match cfg.seed {
        Some(seed) => Simulation::with_seed(cfg.params, seed)?,
        None => Simulation::new(cfg.params)?,
    };
    sim.set_parallel(cfg.parallel);
    sim.register_reporter(
        1,
        Box::new(Progress {
            every: cfg.log_every,
            ticks: Ticks::new(),
        }),
    );
    if let Some(max_steps) = cfg.max_steps {
        let stop = sim.stop_signal();
        sim.register_reporter(
            1,
            Box::new(move |_: &Params, snapshot: &Snapshot| {
                if snapshot.step >= max_steps {
                    stop.request();
                }
            }),
        );
    }
    if let Some(fps) = cfg.target_fps {
        sim.register_reporter(1, Box::new(Throttle::from_fps(fps)));
    }

    let outcome = sim.run();
    println!("{}", outcome.reason);
    println!(
        "Healthy: {}, Infected: {}",
        outcome.num_healthy, outcome.num_infected
    );

    sim.epicurve()
        .write_csv(&cfg.epicurve_csv)
        .with_context(|| format!("could not write {}", cfg.epicurve_csv))?;
    println!("{}", sim.epicurve().render_ascii(100, 20));
    Ok(())
}
