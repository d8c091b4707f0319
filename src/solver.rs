//! Solver facade: load an instance, anneal it, read back the results.

use std::io::Read;
use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{SolverError, SolverResult};
use crate::instance::{self, Instance};
use crate::objective::Objective;
use crate::record::{BestSolution, RunSummary, TraceSink};
use crate::sa::{NeighborGenerator, ParamMode, SaResult, SaRunner};

/// A Weighted MAX-SAT solver with its own seeded random generator.
///
/// # Examples
///
/// ```
/// use u_maxsat::{ParamMode, Solver};
///
/// let source = "p mwcnf 2 2\nw 3 1 0\n1 2 0\n-1 0\n";
/// let mut solver = Solver::new(42);
/// solver.load_from_reader(source.as_bytes(), "two").unwrap();
/// solver.solve(&ParamMode::Auto, None).unwrap();
///
/// let best = solver.best_solution_summary().unwrap();
/// assert_eq!(best.assignment, vec![false, true]);
/// assert_eq!(best.best_weight, 1);
/// ```
#[derive(Debug)]
pub struct Solver {
    rng: StdRng,
    generator: NeighborGenerator,
    instance: Option<Instance>,
    last_run: Option<SaResult>,
}

impl Solver {
    /// Creates a solver whose runs are reproducible from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            generator: NeighborGenerator::default(),
            instance: None,
            last_run: None,
        }
    }

    pub fn with_generator(mut self, generator: NeighborGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Reseeds the random generator.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Loads an MWCNF file. On failure the previous instance and results
    /// are kept.
    pub fn load(&mut self, path: impl AsRef<Path>) -> SolverResult<()> {
        let instance = instance::load(path)?;
        self.set_instance(instance);
        Ok(())
    }

    /// Loads an MWCNF instance from a reader.
    pub fn load_from_reader(
        &mut self,
        source: impl Read,
        name: impl Into<String>,
    ) -> SolverResult<()> {
        let instance = instance::parse_mwcnf(source, name)?;
        self.set_instance(instance);
        Ok(())
    }

    /// Replaces the instance and discards results of earlier runs.
    pub fn set_instance(&mut self, instance: Instance) {
        info!(
            "loaded '{}': {} variables, {} clauses",
            instance.name(),
            instance.num_vars(),
            instance.num_clauses()
        );
        self.instance = Some(instance);
        self.last_run = None;
    }

    pub fn instance(&self) -> Option<&Instance> {
        self.instance.as_ref()
    }

    /// Runs the annealing search on the loaded instance.
    ///
    /// On failure no result is stored and the previous one is kept.
    pub fn solve(
        &mut self,
        mode: &ParamMode,
        trace: Option<&mut dyn TraceSink>,
    ) -> SolverResult<&SaResult> {
        let instance = self.instance.as_ref().ok_or(SolverError::NotLoaded)?;
        let objective = Objective::new(instance)?;
        let config = mode.resolve(instance);

        let result = SaRunner::run(&objective, &self.generator, &config, &mut self.rng, trace)?;
        Ok(self.last_run.insert(result))
    }

    /// Full statistics of the last successful run.
    pub fn last_run(&self) -> Option<&SaResult> {
        self.last_run.as_ref()
    }

    /// `(instanceId, bestWeight, assignment)` of the last run.
    pub fn best_solution_summary(&self) -> SolverResult<BestSolution> {
        let (instance, run) = self.finished()?;
        Ok(BestSolution {
            instance_id: instance.name().to_owned(),
            best_weight: run.best.weight,
            assignment: run.best.assignment.clone(),
        })
    }

    /// `(instanceId, bestWeight, satisfied, unsatisfied, totalSteps)` of
    /// the last run.
    pub fn complete_summary(&self) -> SolverResult<RunSummary> {
        let (instance, run) = self.finished()?;
        Ok(RunSummary {
            instance_id: instance.name().to_owned(),
            best_weight: run.best.weight,
            satisfied: instance.num_clauses() - run.best.unsatisfied,
            unsatisfied: run.best.unsatisfied,
            total_steps: run.iterations,
        })
    }

    fn finished(&self) -> SolverResult<(&Instance, &SaResult)> {
        match (&self.instance, &self.last_run) {
            (Some(instance), Some(run)) => Ok((instance, run)),
            _ => Err(SolverError::NoSolution),
        }
    }
}
