//! Weighted MAX-SAT instance model.
//!
//! An [`Instance`] holds the variables, their positive weights and the
//! clauses of a CNF formula. It is built once (usually by
//! [`parse_mwcnf`] or [`load`]) and is read-only afterwards.
//!
//! Variables are 0-indexed internally: index `i` corresponds to
//! variable `i + 1` of the DIMACS-style file.

mod parser;
mod types;

pub use parser::{load, parse_mwcnf};
pub use types::{Assignment, Clause, Instance, Literal};
