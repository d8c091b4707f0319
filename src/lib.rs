//! Simulated-annealing local search for Weighted MAX-SAT.
//!
//! Given a CNF formula whose variables carry positive weights, the solver
//! looks for an assignment that satisfies every clause while maximizing
//! the total weight of the variables set true. Satisfying more clauses is
//! always preferred over a heavier assignment.
//!
//! - **Instance**: variables, weights and clauses, read from MWCNF files.
//! - **Objective**: normalized energy combining an unsatisfied-clause
//!   penalty with the gap to the ideal weight.
//! - **Simulated Annealing (SA)**: geometric cooling, clause-guided
//!   single-flip neighbors and Metropolis acceptance.
//! - **Recorder / Report**: best-solution bookkeeping, per-step traces
//!   and their CSV rendering.
//!
//! Runs are reproducible: every [`Solver`] owns one seeded generator.

pub mod error;
pub mod instance;
pub mod objective;
pub mod record;
pub mod report;
pub mod sa;
mod solver;

pub use error::{LoadError, SolverError, SolverResult};
pub use instance::{Assignment, Instance};
pub use objective::{Evaluation, Objective};
pub use record::{BestResult, BestSolution, RunSummary, TraceRecord, TraceSink};
pub use sa::{ParamMode, SaConfig, SaResult};
pub use solver::Solver;
