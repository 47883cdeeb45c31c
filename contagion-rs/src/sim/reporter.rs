use super::{Outcome, Snapshot};
use crate::params::Params;

pub type ReporterList = Vec<(usize, Box<dyn Reporter>)>;

/// Trait for observers that receive a snapshot of the simulation after every
/// step: renderers, statistics collectors, progress loggers, frame limiters,
/// etc.
///
/// Closures taking `(&Params, &Snapshot)` can be used directly as reporters.
pub trait Reporter {
    /// Observe the state of the simulation after a step.
    fn process(&mut self, params: &Params, snapshot: &Snapshot);

    /// Called once when the simulation terminates.
    fn finish(&mut self, _outcome: &Outcome) {}
}

/// A GrowableReporter can include arbitrary reporters that execute during the
/// reporting phase.
pub trait GrowableReporter: Reporter {
    /// Register a reporter to be called every n_steps.
    fn register_reporter(&mut self, n_steps: usize, reporter: Box<dyn Reporter>);
}

/////////////////////////////////////////////////////////////////////////////
// Reporter instances
/////////////////////////////////////////////////////////////////////////////

impl<F> Reporter for F
where
    F: FnMut(&Params, &Snapshot),
{
    fn process(&mut self, params: &Params, snapshot: &Snapshot) {
        self(params, snapshot)
    }
}

impl Reporter for () {
    fn process(&mut self, _params: &Params, _snapshot: &Snapshot) {}
}

impl<R1, R2> Reporter for (R1, R2)
where
    R1: Reporter,
    R2: Reporter,
{
    fn process(&mut self, params: &Params, snapshot: &Snapshot) {
        self.0.process(params, snapshot);
        self.1.process(params, snapshot);
    }

    fn finish(&mut self, outcome: &Outcome) {
        self.0.finish(outcome);
        self.1.finish(outcome);
    }
}

impl<R1, R2, R3> Reporter for (R1, R2, R3)
where
    R1: Reporter,
    R2: Reporter,
    R3: Reporter,
{
    fn process(&mut self, params: &Params, snapshot: &Snapshot) {
        self.0.process(params, snapshot);
        self.1.process(params, snapshot);
        self.2.process(params, snapshot);
    }

    fn finish(&mut self, outcome: &Outcome) {
        self.0.finish(outcome);
        self.1.finish(outcome);
        self.2.finish(outcome);
    }
}

impl<R1, R2, R3, R4> Reporter for (R1, R2, R3, R4)
where
    R1: Reporter,
    R2: Reporter,
    R3: Reporter,
    R4: Reporter,
{
    fn process(&mut self, params: &Params, snapshot: &Snapshot) {
        self.0.process(params, snapshot);
        self.1.process(params, snapshot);
        self.2.process(params, snapshot);
        self.3.process(params, snapshot);
    }

    fn finish(&mut self, outcome: &Outcome) {
        self.0.finish(outcome);
        self.1.finish(outcome);
        self.2.finish(outcome);
        self.3.finish(outcome);
    }
}

impl Reporter for ReporterList {
    fn process(&mut self, params: &Params, snapshot: &Snapshot) {
        for (every, r) in self.iter_mut() {
            if snapshot.step % (*every).max(1) == 0 {
                r.process(params, snapshot);
            }
        }
    }

    fn finish(&mut self, outcome: &Outcome) {
        for (_, r) in self.iter_mut() {
            r.finish(outcome);
        }
    }
}

/////////////////////////////////////////////////////////////////////////////
// Growable Reporter instances
/////////////////////////////////////////////////////////////////////////////

impl GrowableReporter for ReporterList {
    fn register_reporter(&mut self, n_steps: usize, reporter: Box<dyn Reporter>) {
        self.push((n_steps, reporter));
    }
}

impl<R1, R2> GrowableReporter for (R1, R2)
where
    R1: Reporter,
    R2: GrowableReporter,
{
    fn register_reporter(&mut self, n_steps: usize, reporter: Box<dyn Reporter>) {
        self.1.register_reporter(n_steps, reporter);
    }
}
