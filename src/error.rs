//! Error types for loading instances and running the solver.

use thiserror::Error;

/// Convenience alias for results produced by the [`Solver`](crate::Solver).
pub type SolverResult<T> = Result<T, SolverError>;

/// Failure to read an MWCNF instance.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read instance, more details: {0}")]
    Io(#[from] std::io::Error),

    #[error("no valid 'p mwcnf <vars> <clauses>' line")]
    MissingHeader,

    #[error("'{0}' is an invalid header")]
    InvalidHeader(String),

    #[error("no 'w' line with weights")]
    MissingWeights,

    #[error("the weights sum past {}", u64::MAX)]
    WeightOverflow,

    #[error("literal {literal} refers to a variable outside 1..={num_vars}")]
    LiteralOutOfRange { literal: i32, num_vars: usize },
}

/// Failure reported by the solver facade.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to load instance: {0}")]
    Load(#[from] LoadError),

    #[error("no instance has been loaded")]
    NotLoaded,

    #[error("the instance has {0}, nothing to search")]
    EmptyInstance(&'static str),

    #[error("invalid annealing parameters: {0}")]
    InvalidConfig(String),

    #[error("no solution available, run solve first")]
    NoSolution,

    #[error("failed to write trace record: {0}")]
    Trace(std::io::Error),
}
