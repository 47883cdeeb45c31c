use super::Population;
use crate::params::{CapPolicy, Params};
use getset::CopyGetters;
use rand::{seq::index, Rng};

/// Keeps the population at or under `max_people`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct CapEnforcer {
    max_people: usize,
    policy: CapPolicy,
}

impl CapEnforcer {
    pub fn new(max_people: usize, policy: CapPolicy) -> Self {
        CapEnforcer { max_people, policy }
    }

    pub fn from_params(params: &Params) -> Self {
        Self::new(params.max_people(), params.cap_policy())
    }

    /// Reduce population to exactly `max_people` agents if it is larger.
    /// Return the number of discarded agents.
    pub fn apply<R: Rng>(&self, pop: &mut Population, rng: &mut R) -> usize {
        let n = pop.size();
        if n <= self.max_people {
            return 0;
        }
        match self.policy {
            CapPolicy::Truncate => pop.truncate(self.max_people),
            CapPolicy::Subsample => {
                let mut keep = index::sample(rng, n, self.max_people).into_vec();
                keep.sort_unstable();
                *pop = pop.select(&keep);
            }
        }
        n - self.max_people
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Health::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn numbered(n: usize) -> Population {
        Population::from_points((0..n).map(|i| ((i as f64, 0.0), Healthy)))
    }

    #[test]
    fn truncate_keeps_oldest_agents() {
        let cap = CapEnforcer::new(3, CapPolicy::Truncate);
        let mut pop = numbered(5);
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(cap.apply(&mut pop, &mut rng), 2);
        let xs: Vec<f64> = pop.iter().map(|((x, _), _)| x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn subsample_keeps_order_and_size() {
        let cap = CapEnforcer::new(10, CapPolicy::Subsample);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut seen_tail = false;
        for _ in 0..20 {
            let mut pop = numbered(30);
            assert_eq!(cap.apply(&mut pop, &mut rng), 20);
            assert_eq!(pop.size(), 10);
            let xs: Vec<f64> = pop.iter().map(|((x, _), _)| x).collect();
            assert!(xs.windows(2).all(|w| w[0] < w[1]));
            seen_tail |= xs.iter().any(|&x| x >= 10.0);
        }
        // Unlike truncation, agents past the cap have a chance to survive.
        assert!(seen_tail);
    }

    #[test]
    fn under_cap_is_untouched() {
        let mut rng = SmallRng::seed_from_u64(0);
        for &policy in &[CapPolicy::Truncate, CapPolicy::Subsample] {
            let cap = CapEnforcer::new(5, policy);
            let mut pop = numbered(5);
            assert_eq!(cap.apply(&mut pop, &mut rng), 0);
            assert_eq!(pop, numbered(5));
        }
    }
}
