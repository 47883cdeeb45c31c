use crate::{
    params::Params,
    prelude::Real,
    sim::{Reporter, Snapshot},
};
use getset::{CopyGetters, Getters, Setters};
use std::{
    thread::sleep,
    time::{Duration, Instant},
};

/// A simple throttle that limits the step rate to some specified amount.
///
/// Registered as a reporter, it sleeps for whatever remains of `duration`
/// since the previous snapshot.
#[derive(Getters, CopyGetters, Setters, Debug, Clone)]
pub struct Throttle {
    #[getset(get_copy = "pub")]
    instant: Instant,
    #[getset(get = "pub", set = "pub")]
    duration: Duration,
}

impl Throttle {
    pub fn new(duration: Duration) -> Self {
        Throttle {
            instant: Instant::now(),
            duration,
        }
    }

    pub fn new_sec(dt: Real) -> Self {
        Self::new(Duration::from_secs_f64(dt.max(0.0)))
    }

    /// Throttle to at most `fps` steps per second.
    pub fn from_fps(fps: Real) -> Self {
        if fps > 0.0 {
            Self::new_sec(1.0 / fps)
        } else {
            Self::new(Duration::ZERO)
        }
    }

    /// Sleep until at least `duration` has passed since the last call.
    pub fn wait(&mut self) {
        let elapsed = self.instant.elapsed();
        if let Some(rest) = self.duration.checked_sub(elapsed) {
            sleep(rest);
        }
        self.instant = Instant::now();
    }
}

impl Reporter for Throttle {
    fn process(&mut self, _: &Params, _: &Snapshot) {
        self.wait()
    }
}

/// A simple clock that measures the wall time between consecutive snapshots.
#[derive(Getters, CopyGetters, Debug, Clone)]
pub struct Ticks {
    #[getset(get_copy = "pub")]
    instant: Instant,
    #[getset(get_copy = "pub")]
    count: usize,
    #[getset(get_copy = "pub")]
    total: Duration,
    #[getset(get_copy = "pub")]
    slowest: Duration,
}

impl Ticks {
    pub fn new() -> Self {
        Ticks {
            instant: Instant::now(),
            count: 0,
            total: Duration::ZERO,
            slowest: Duration::ZERO,
        }
    }

    /// Register the time elapsed since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.instant);
        self.instant = now;
        self.count += 1;
        self.total += delta;
        self.slowest = self.slowest.max(delta);
    }

    /// Mean interval between ticks in seconds, NaN before the first tick.
    pub fn mean_secs(&self) -> Real {
        self.total.as_secs_f64() / self.count as Real
    }
}

impl Default for Ticks {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for Ticks {
    fn process(&mut self, _: &Params, _: &Snapshot) {
        self.tick()
    }
}
