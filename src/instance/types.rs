//! Literals, clauses and the instance itself.

use std::num::NonZeroI32;

use crate::error::LoadError;

/// A truth value per variable, 0-indexed.
pub type Assignment = Vec<bool>;

/// A variable or its negation, stored in DIMACS encoding.
///
/// The magnitude is the 1-based variable index, the sign the polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal(NonZeroI32);

impl Literal {
    /// Creates a literal from its DIMACS encoding. Returns `None` for `0`.
    pub fn from_dimacs(value: i32) -> Option<Self> {
        NonZeroI32::new(value).map(Literal)
    }

    /// The 0-based index of the underlying variable.
    pub fn variable(self) -> usize {
        self.0.unsigned_abs().get() as usize - 1
    }

    pub fn is_positive(self) -> bool {
        self.0.get() > 0
    }

    pub fn to_dimacs(self) -> i32 {
        self.0.get()
    }

    /// Evaluates the literal under `assignment`.
    pub fn is_true(self, assignment: &[bool]) -> bool {
        assignment[self.variable()] == self.is_positive()
    }
}

/// A disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A clause is satisfied when at least one literal is true.
    pub fn is_satisfied(&self, assignment: &[bool]) -> bool {
        self.literals.iter().any(|lit| lit.is_true(assignment))
    }
}

/// A Weighted MAX-SAT instance.
///
/// # Invariants
///
/// - `weights.len() == num_vars`
/// - every literal refers to a variable in `0..num_vars`
/// - no clause is empty
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    name: String,
    num_vars: usize,
    declared_clauses: usize,
    weights: Vec<u64>,
    total_weight: u64,
    clauses: Vec<Clause>,
}

impl Instance {
    /// Builds an instance from raw DIMACS clauses.
    ///
    /// `weights` is zero-padded or truncated to `num_vars`. Empty clauses
    /// are dropped. The declared clause count is taken as the number of
    /// retained clauses.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::LiteralOutOfRange`] if a literal names a
    /// variable outside `1..=num_vars`, and [`LoadError::WeightOverflow`]
    /// if the weights do not sum to a `u64`.
    pub fn new(
        name: impl Into<String>,
        num_vars: usize,
        weights: Vec<u64>,
        clauses: Vec<Vec<i32>>,
    ) -> Result<Self, LoadError> {
        let mut instance = Self::with_declared(name, num_vars, 0, weights, clauses)?;
        instance.declared_clauses = instance.clauses.len();
        Ok(instance)
    }

    pub(crate) fn with_declared(
        name: impl Into<String>,
        num_vars: usize,
        declared_clauses: usize,
        mut weights: Vec<u64>,
        raw_clauses: Vec<Vec<i32>>,
    ) -> Result<Self, LoadError> {
        weights.resize(num_vars, 0);
        let total_weight = weights
            .iter()
            .try_fold(0u64, |sum, &w| sum.checked_add(w))
            .ok_or(LoadError::WeightOverflow)?;

        let mut clauses = Vec::with_capacity(raw_clauses.len());
        for raw in raw_clauses {
            let mut literals = Vec::with_capacity(raw.len());
            for value in raw {
                let Some(literal) = Literal::from_dimacs(value) else {
                    continue;
                };
                if literal.variable() >= num_vars {
                    return Err(LoadError::LiteralOutOfRange {
                        literal: value,
                        num_vars,
                    });
                }
                literals.push(literal);
            }
            if !literals.is_empty() {
                clauses.push(Clause { literals });
            }
        }

        Ok(Self {
            name: name.into(),
            num_vars,
            declared_clauses,
            weights,
            total_weight,
            clauses,
        })
    }

    /// Identifier of the instance, usually the file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of clauses actually held by the instance.
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Clause count declared in the header. Informational only.
    pub fn declared_clauses(&self) -> usize {
        self.declared_clauses
    }

    /// Weight of the 0-indexed variable `var`.
    pub fn weight(&self, var: usize) -> u64 {
        self.weights[var]
    }

    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    /// Sum of all weights: the weight of the all-true assignment.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Sum of weights of the variables set true. Never exceeds
    /// [`total_weight`](Self::total_weight).
    pub fn weight_of(&self, assignment: &[bool]) -> u64 {
        self.weights
            .iter()
            .zip(assignment)
            .filter(|&(_, &value)| value)
            .map(|(&w, _)| w)
            .sum()
    }

    /// Number of clauses left unsatisfied by `assignment`.
    pub fn count_unsatisfied(&self, assignment: &[bool]) -> usize {
        self.clauses
            .iter()
            .filter(|clause| !clause.is_satisfied(assignment))
            .count()
    }

    /// Indices of the clauses left unsatisfied by `assignment`, in order.
    pub fn unsatisfied_clauses(&self, assignment: &[bool]) -> Vec<usize> {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, clause)| !clause.is_satisfied(assignment))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_var() -> Instance {
        Instance::new("two", 2, vec![3, 1], vec![vec![1, 2], vec![-1]]).unwrap()
    }

    #[test]
    fn test_literal_encoding() {
        let pos = Literal::from_dimacs(3).unwrap();
        let neg = Literal::from_dimacs(-3).unwrap();
        assert_eq!(pos.variable(), 2);
        assert_eq!(neg.variable(), 2);
        assert!(pos.is_positive());
        assert!(!neg.is_positive());
        assert_eq!(neg.to_dimacs(), -3);
        assert!(Literal::from_dimacs(0).is_none());
    }

    #[test]
    fn test_literal_evaluation() {
        let assignment = vec![true, false];
        assert!(Literal::from_dimacs(1).unwrap().is_true(&assignment));
        assert!(!Literal::from_dimacs(-1).unwrap().is_true(&assignment));
        assert!(Literal::from_dimacs(-2).unwrap().is_true(&assignment));
    }

    #[test]
    fn test_unsatisfied_counts() {
        let instance = two_var();
        // all false: [1,2] unsat, [-1] sat
        assert_eq!(instance.count_unsatisfied(&[false, false]), 1);
        assert_eq!(instance.unsatisfied_clauses(&[false, false]), vec![0]);
        // all true: [-1] unsat
        assert_eq!(instance.unsatisfied_clauses(&[true, true]), vec![1]);
        assert_eq!(instance.count_unsatisfied(&[false, true]), 0);
    }

    #[test]
    fn test_weights() {
        let instance = two_var();
        assert_eq!(instance.total_weight(), 4);
        assert_eq!(instance.weight(0), 3);
        assert_eq!(instance.weight_of(&[false, true]), 1);
        assert_eq!(instance.weight_of(&[true, true]), 4);
    }

    #[test]
    fn test_weights_padded_and_truncated() {
        let short = Instance::new("s", 3, vec![2], vec![vec![1]]).unwrap();
        assert_eq!(short.weights(), &[2, 0, 0]);
        let long = Instance::new("l", 1, vec![2, 7, 9], vec![vec![1]]).unwrap();
        assert_eq!(long.weights(), &[2]);
    }

    #[test]
    fn test_weight_overflow() {
        let err = Instance::new("o", 2, vec![u64::MAX, 1], vec![vec![1]]).unwrap_err();
        assert!(matches!(err, LoadError::WeightOverflow));
        let max = Instance::new("m", 2, vec![u64::MAX - 1, 1], vec![vec![1]]).unwrap();
        assert_eq!(max.total_weight(), u64::MAX);
        assert_eq!(max.weight_of(&[true, true]), u64::MAX);
    }

    #[test]
    fn test_empty_clauses_dropped() {
        let instance = Instance::new("e", 1, vec![1], vec![vec![], vec![1]]).unwrap();
        assert_eq!(instance.num_clauses(), 1);
        assert_eq!(instance.declared_clauses(), 1);
    }

    #[test]
    fn test_literal_out_of_range() {
        let err = Instance::new("bad", 2, vec![1, 1], vec![vec![1, -3]]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::LiteralOutOfRange {
                literal: -3,
                num_vars: 2
            }
        ));
    }
}
