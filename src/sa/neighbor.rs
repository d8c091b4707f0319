//! Clause-guided single-flip neighborhood.
//!
//! A neighbor differs from its source assignment in exactly one variable.
//! If every clause is satisfied the flipped variable is chosen uniformly
//! at random. Otherwise one unsatisfied clause is picked at random and one
//! of its variables is flipped, either a random one (noise) or the one
//! whose flip leaves the fewest clauses unsatisfied overall (greedy).
//!
//! The greedy branch rescans the whole formula for every literal of the
//! chosen clause.

use rand::Rng;

use crate::instance::{Assignment, Instance};

/// Probability of taking the noise branch under [`MoveStrategy::Mixed`].
pub const DEFAULT_NOISE: f64 = 0.5;

/// Which branch to use when repairing an unsatisfied clause.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveStrategy {
    /// Noise with the given probability, greedy otherwise.
    Mixed { noise: f64 },
    /// Always flip a random variable of the clause.
    Noise,
    /// Always flip the best variable of the clause.
    Greedy,
}

impl Default for MoveStrategy {
    fn default() -> Self {
        MoveStrategy::Mixed {
            noise: DEFAULT_NOISE,
        }
    }
}

/// The branch that produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Formula fully satisfied, random variable flipped.
    Diversify,
    Noise,
    Greedy,
}

/// A single variable flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// 0-based index of the flipped variable.
    pub variable: usize,
    pub kind: MoveKind,
    /// Index of the unsatisfied clause the move repairs, if any.
    pub clause: Option<usize>,
}

/// Generates neighbors of an assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborGenerator {
    strategy: MoveStrategy,
}

impl Default for NeighborGenerator {
    fn default() -> Self {
        Self::new(MoveStrategy::default())
    }
}

impl NeighborGenerator {
    pub fn new(strategy: MoveStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> MoveStrategy {
        self.strategy
    }

    /// Returns a fresh assignment one flip away from `assignment`.
    pub fn neighbor<R: Rng>(
        &self,
        instance: &Instance,
        assignment: &[bool],
        rng: &mut R,
    ) -> (Assignment, Move) {
        let mut candidate = assignment.to_vec();
        let mv = self.select_move(instance, &mut candidate, rng);
        candidate[mv.variable] = !candidate[mv.variable];
        (candidate, mv)
    }

    /// Chooses the variable to flip.
    ///
    /// `scratch` is used for hypothetical flips and is restored before
    /// returning.
    fn select_move<R: Rng>(&self, instance: &Instance, scratch: &mut [bool], rng: &mut R) -> Move {
        let unsatisfied = instance.unsatisfied_clauses(scratch);
        if unsatisfied.is_empty() {
            return Move {
                variable: rng.random_range(0..instance.num_vars()),
                kind: MoveKind::Diversify,
                clause: None,
            };
        }

        let clause_idx = unsatisfied[rng.random_range(0..unsatisfied.len())];
        let literals = instance.clauses()[clause_idx].literals();

        let use_noise = match self.strategy {
            MoveStrategy::Mixed { noise } => rng.random_range(0.0..1.0) < noise,
            MoveStrategy::Noise => true,
            MoveStrategy::Greedy => false,
        };

        if use_noise {
            let literal = literals[rng.random_range(0..literals.len())];
            return Move {
                variable: literal.variable(),
                kind: MoveKind::Noise,
                clause: Some(clause_idx),
            };
        }

        let mut best_var = literals[0].variable();
        let mut best_unsat = usize::MAX;
        for literal in literals {
            let var = literal.variable();
            scratch[var] = !scratch[var];
            let unsat = instance.count_unsatisfied(scratch);
            scratch[var] = !scratch[var];

            if unsat < best_unsat {
                best_unsat = unsat;
                best_var = var;
            }
        }

        Move {
            variable: best_var,
            kind: MoveKind::Greedy,
            clause: Some(clause_idx),
        }
    }
}
