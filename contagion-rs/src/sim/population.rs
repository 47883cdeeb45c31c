use super::Health;
use crate::prelude::Real;
use ndarray::{concatenate, s, Array2, Axis};
use paste::paste;

/// Generate counting, masking and indexing methods for a health state.
macro_rules! state_methods {
    ($name:ident, $state:expr) => {
        paste! {
            #[doc = "Number of agents in the `" $name "` state."]
            pub fn [<n_ $name>](&self) -> usize {
                self.health.iter().filter(|&&st| st == $state).count()
            }

            #[doc = "Boolean mask selecting agents in the `" $name "` state."]
            pub fn [<$name _mask>](&self) -> Vec<bool> {
                self.health.iter().map(|&st| st == $state).collect()
            }

            #[doc = "Indexes of all agents in the `" $name "` state."]
            pub fn [<$name _indexes>](&self) -> Vec<usize> {
                self.health
                    .iter()
                    .enumerate()
                    .filter(|(_, &st)| st == $state)
                    .map(|(i, _)| i)
                    .collect()
            }
        }
    };
}

/// An ordered batch of agents stored as parallel arrays.
///
/// Positions live in a `(n, 2)` matrix (x in column 0, y in column 1) and
/// health states in a vector of the same length. Agents have no identity
/// besides their index, and no operation reorders them: filtering keeps the
/// relative order of survivors and concatenation appends after the existing
/// agents.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    positions: Array2<Real>,
    health: Vec<Health>,
}

impl Population {
    /// Create population from a `(n, 2)` position matrix and `n` states.
    ///
    /// # Panics
    ///
    /// If the shapes of both arrays are not compatible.
    pub fn from_parts(positions: Array2<Real>, health: Vec<Health>) -> Self {
        assert_eq!(positions.ncols(), 2, "positions must have two columns");
        assert_eq!(
            positions.nrows(),
            health.len(),
            "positions and states must have the same length"
        );
        Population { positions, health }
    }

    /// Create population from a list of `((x, y), state)` pairs.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = ((Real, Real), Health)>,
    {
        let (coords, health): (Vec<[Real; 2]>, Vec<Health>) = points
            .into_iter()
            .map(|((x, y), st)| ([x, y], st))
            .unzip();
        Population {
            positions: Array2::from(coords),
            health,
        }
    }

    /// A population with no agents.
    pub fn empty() -> Self {
        Population {
            positions: Array2::zeros((0, 2)),
            health: vec![],
        }
    }

    /// Population size.
    pub fn size(&self) -> usize {
        self.health.len()
    }

    pub fn is_empty(&self) -> bool {
        self.health.is_empty()
    }

    /// Borrow the `(n, 2)` position matrix.
    pub fn positions(&self) -> &Array2<Real> {
        &self.positions
    }

    pub(crate) fn positions_mut(&mut self) -> &mut Array2<Real> {
        &mut self.positions
    }

    /// Borrow the health states, aligned with the rows of `positions()`.
    pub fn health(&self) -> &[Health] {
        &self.health
    }

    /// Position of the i-th agent.
    pub fn position(&self, i: usize) -> (Real, Real) {
        (self.positions[[i, 0]], self.positions[[i, 1]])
    }

    /// State of the i-th agent.
    pub fn state(&self, i: usize) -> Health {
        self.health[i]
    }

    /// Set the state of the i-th agent.
    pub(crate) fn set_state(&mut self, i: usize, state: Health) {
        self.health[i] = state;
    }

    /// Iterate over `((x, y), state)` pairs in population order.
    pub fn iter(&self) -> impl Iterator<Item = ((Real, Real), Health)> + '_ {
        self.positions
            .axis_iter(Axis(0))
            .zip(self.health.iter())
            .map(|(row, &st)| ((row[0], row[1]), st))
    }

    /// Count agents in each state, in `Health::index()` order.
    pub fn count_by_state(&self) -> [usize; Health::CARDINALITY] {
        let mut out = [0; Health::CARDINALITY];
        for st in self.health.iter() {
            out[st.index()] += 1;
        }
        out
    }

    state_methods!(healthy, Health::Healthy);
    state_methods!(infected, Health::Infected);

    /// Return a new population with the agents at the given indexes, in the
    /// order they appear in `indexes`.
    pub fn select(&self, indexes: &[usize]) -> Population {
        let positions = self.positions.select(Axis(0), indexes);
        let health = indexes.iter().map(|&i| self.health[i]).collect();
        Population { positions, health }
    }

    /// Return a new population with only the agents whose mask entry is true.
    /// Relative order is preserved.
    ///
    /// # Panics
    ///
    /// If mask length differs from population size.
    pub fn filter(&self, mask: &[bool]) -> Population {
        assert_eq!(mask.len(), self.size(), "mask length must match population");
        let indexes: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, &keep)| keep)
            .map(|(i, _)| i)
            .collect();
        self.select(&indexes)
    }

    /// Return a new population with the agents of `other` appended after the
    /// agents of `self`.
    pub fn concat(&self, other: &Population) -> Population {
        let positions = concatenate![Axis(0), self.positions, other.positions];
        let mut health = Vec::with_capacity(self.size() + other.size());
        health.extend_from_slice(&self.health);
        health.extend_from_slice(&other.health);
        Population { positions, health }
    }

    /// Keep only the first `n` agents. No-op if population is not larger.
    pub fn truncate(&mut self, n: usize) {
        if n >= self.size() {
            return;
        }
        self.positions = self.positions.slice(s![..n, ..]).to_owned();
        self.health.truncate(n);
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::empty()
    }
}
