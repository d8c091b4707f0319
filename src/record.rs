//! Best-solution bookkeeping and per-step trace records.
//!
//! The [`Recorder`] holds plain data only. Rendering to text lives in
//! [`report`](crate::report) and reads the recorder's output through
//! [`BestResult`], [`RunSummary`] and [`BestSolution`].

use std::io;

use crate::instance::Assignment;
use crate::objective::{Evaluation, Objective};

/// Best assignment found during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestResult {
    pub assignment: Assignment,
    pub unsatisfied: usize,
    pub weight: u64,
}

impl BestResult {
    /// Whether `candidate` should replace this result.
    ///
    /// Fewer unsatisfied clauses always wins. Weight only decides between
    /// two fully satisfying assignments.
    pub fn is_improved_by(&self, candidate: &Evaluation) -> bool {
        if candidate.unsatisfied != self.unsatisfied {
            return candidate.unsatisfied < self.unsatisfied;
        }
        self.unsatisfied == 0 && candidate.weight > self.weight
    }

    /// Energy of the best result, recomputed on demand.
    pub fn energy(&self, objective: &Objective<'_>) -> f64 {
        objective.energy_of(self.unsatisfied, self.weight)
    }
}

/// Unsatisfied count and weight of the best result at some point of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestSnapshot {
    pub step: usize,
    pub unsatisfied: usize,
    pub weight: u64,
}

/// State of the search after one step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceRecord {
    pub step: usize,
    pub energy: f64,
    pub satisfied: usize,
    pub unsatisfied: usize,
    pub weight: u64,
}

/// Receives trace records during a run.
pub trait TraceSink {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()>;
}

impl TraceSink for Vec<TraceRecord> {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        self.push(*record);
        Ok(())
    }
}

/// Summary line of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub instance_id: String,
    pub best_weight: u64,
    pub satisfied: usize,
    pub unsatisfied: usize,
    pub total_steps: usize,
}

/// Best assignment of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestSolution {
    pub instance_id: String,
    pub best_weight: u64,
    pub assignment: Assignment,
}

/// Tracks the best result and step count of a run and forwards trace
/// records to an optional sink.
pub struct Recorder<'t> {
    best: BestResult,
    steps: usize,
    num_clauses: usize,
    trace: Option<&'t mut dyn TraceSink>,
}

impl std::fmt::Debug for Recorder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("best", &self.best)
            .field("steps", &self.steps)
            .field("tracing", &self.trace.is_some())
            .finish()
    }
}

impl<'t> Recorder<'t> {
    /// Starts recording from the initial state, emitting trace row 0.
    pub fn start(
        initial: &[bool],
        evaluation: &Evaluation,
        num_clauses: usize,
        trace: Option<&'t mut dyn TraceSink>,
    ) -> io::Result<Self> {
        let mut recorder = Self {
            best: BestResult {
                assignment: initial.to_vec(),
                unsatisfied: evaluation.unsatisfied,
                weight: evaluation.weight,
            },
            steps: 0,
            num_clauses,
            trace,
        };
        recorder.emit(evaluation)?;
        Ok(recorder)
    }

    /// Offers an accepted state. Returns `true` if it became the new best.
    pub fn offer(&mut self, assignment: &[bool], evaluation: &Evaluation) -> bool {
        if !self.best.is_improved_by(evaluation) {
            return false;
        }
        self.best.assignment.clear();
        self.best.assignment.extend_from_slice(assignment);
        self.best.unsatisfied = evaluation.unsatisfied;
        self.best.weight = evaluation.weight;
        true
    }

    /// Counts one inner iteration and traces the current state.
    pub fn step(&mut self, current: &Evaluation) -> io::Result<()> {
        self.steps += 1;
        self.emit(current)
    }

    pub fn best(&self) -> &BestResult {
        &self.best
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn snapshot(&self) -> BestSnapshot {
        BestSnapshot {
            step: self.steps,
            unsatisfied: self.best.unsatisfied,
            weight: self.best.weight,
        }
    }

    pub fn into_best(self) -> BestResult {
        self.best
    }

    fn emit(&mut self, evaluation: &Evaluation) -> io::Result<()> {
        let Some(sink) = self.trace.as_deref_mut() else {
            return Ok(());
        };
        sink.record(&TraceRecord {
            step: self.steps,
            energy: evaluation.energy,
            satisfied: self.num_clauses - evaluation.unsatisfied,
            unsatisfied: evaluation.unsatisfied,
            weight: evaluation.weight,
        })
    }
}
