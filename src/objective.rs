//! Energy function minimized by the annealing search.
//!
//! ```text
//! energy = (unsat * penalty + (ideal_weight - weight)) / average_weight
//! ```
//!
//! `ideal_weight` is the weight of the all-true assignment and
//! `average_weight = ideal_weight / num_vars`, so energies are comparable
//! across instances of different scale. The default penalty is the sum of
//! all weights, large enough that one fewer unsatisfied clause outweighs
//! any weight gap. An all-true assignment satisfying every clause has
//! energy 0.

use crate::error::SolverError;
use crate::instance::Instance;

/// Energy of an assignment together with its side outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Scalar objective. Lower is better.
    pub energy: f64,
    /// Number of unsatisfied clauses.
    pub unsatisfied: usize,
    /// Sum of weights of the variables set true.
    pub weight: u64,
}

/// Scores assignments of one instance.
#[derive(Debug, Clone, Copy)]
pub struct Objective<'a> {
    instance: &'a Instance,
    penalty: f64,
    ideal_weight: u64,
    average_weight: f64,
}

impl<'a> Objective<'a> {
    /// Creates the evaluator with the sum of all weights as penalty.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::EmptyInstance`] if the instance has no
    /// variables or all weights are zero.
    pub fn new(instance: &'a Instance) -> Result<Self, SolverError> {
        let base = instance.total_weight() as f64;
        Self::with_penalty(instance, base)
    }

    /// Creates the evaluator with an explicit penalty scale.
    pub fn with_penalty(instance: &'a Instance, penalty: f64) -> Result<Self, SolverError> {
        if instance.num_vars() == 0 {
            return Err(SolverError::EmptyInstance("zero variables"));
        }
        let ideal_weight = instance.total_weight();
        if ideal_weight == 0 {
            return Err(SolverError::EmptyInstance("zero total weight"));
        }
        Ok(Self {
            instance,
            penalty,
            ideal_weight,
            average_weight: ideal_weight as f64 / instance.num_vars() as f64,
        })
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Sum of all weights, the base of the default penalty.
    pub fn base_penalty(&self) -> f64 {
        self.ideal_weight as f64
    }

    pub fn ideal_weight(&self) -> u64 {
        self.ideal_weight
    }

    pub fn average_weight(&self) -> f64 {
        self.average_weight
    }

    /// Scores `assignment`.
    pub fn evaluate(&self, assignment: &[bool]) -> Evaluation {
        let unsatisfied = self.instance.count_unsatisfied(assignment);
        let weight = self.instance.weight_of(assignment);
        Evaluation {
            energy: self.energy_of(unsatisfied, weight),
            unsatisfied,
            weight,
        }
    }

    /// Energy for a given unsatisfied count and weight sum.
    pub fn energy_of(&self, unsatisfied: usize, weight: u64) -> f64 {
        let gap = self.ideal_weight.saturating_sub(weight) as f64;
        (unsatisfied as f64 * self.penalty + gap) / self.average_weight
    }
}
