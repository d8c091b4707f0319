//! SA execution loop.

use log::{debug, info};
use rand::Rng;

use super::config::SaConfig;
use super::neighbor::NeighborGenerator;
use crate::error::SolverError;
use crate::instance::Assignment;
use crate::objective::Objective;
use crate::record::{BestResult, BestSnapshot, Recorder, TraceSink};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// The best assignment found.
    pub best: BestResult,

    /// Energy of the best assignment.
    pub best_energy: f64,

    /// Parameters the run actually used.
    pub config: SaConfig,

    /// Total number of inner iterations (neighbor evaluations).
    pub iterations: usize,

    /// Number of temperature levels visited.
    pub temperature_steps: usize,

    /// Temperature when the schedule froze.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of moves with strictly negative energy delta.
    pub improving_moves: usize,

    /// Rejections since the last accepted move, at the end of the run.
    pub stagnation: usize,

    /// Longest run of consecutive rejections.
    pub longest_stagnation: usize,

    /// Stagnation bound of the schedule. Reported only, no restart is
    /// triggered when it is exceeded.
    pub stagnation_bound: usize,

    /// Best result sampled after every temperature level, starting with
    /// the initial state.
    pub best_history: Vec<BestSnapshot>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs the annealing schedule from a random initial assignment.
    ///
    /// When `trace` is given it receives one record for the initial state
    /// and one per inner iteration.
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidConfig`] if `config` does not validate
    /// - [`SolverError::EmptyInstance`] if the instance has no clauses
    /// - [`SolverError::Trace`] if the sink fails to record a step
    pub fn run<R: Rng>(
        objective: &Objective<'_>,
        generator: &NeighborGenerator,
        config: &SaConfig,
        rng: &mut R,
        trace: Option<&mut dyn TraceSink>,
    ) -> Result<SaResult, SolverError> {
        config.validate().map_err(SolverError::InvalidConfig)?;

        let instance = objective.instance();
        if instance.num_clauses() == 0 {
            return Err(SolverError::EmptyInstance("zero clauses"));
        }

        let stagnation_bound = config.stagnation_bound(instance.num_vars());
        info!(
            "annealing '{}': T0={:.4}, Tmin={:.4}, alpha={}, iters/T={}, stagnation bound={}",
            instance.name(),
            config.initial_temperature,
            config.min_temperature,
            config.alpha,
            config.iterations_per_temperature,
            stagnation_bound
        );

        // Initialize
        let mut current: Assignment = (0..instance.num_vars())
            .map(|_| rng.random_bool(0.5))
            .collect();
        let mut current_eval = objective.evaluate(&current);
        let mut recorder = Recorder::start(&current, &current_eval, instance.num_clauses(), trace)
            .map_err(SolverError::Trace)?;

        let mut temperature = config.initial_temperature;
        let mut temperature_steps = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut stagnation = 0usize;
        let mut longest_stagnation = 0usize;
        let mut best_history = vec![recorder.snapshot()];

        while !config.frozen(temperature) {
            let mut at_temperature = 0usize;

            while !config.equilibrium(at_temperature) {
                let (candidate, _) = generator.neighbor(instance, &current, rng);
                let candidate_eval = objective.evaluate(&candidate);
                let delta = candidate_eval.energy - current_eval.energy;

                if delta < 0.0 {
                    improving_moves += 1;
                }

                if accepts(delta, temperature, rng) {
                    current = candidate;
                    current_eval = candidate_eval;
                    accepted_moves += 1;
                    stagnation = 0;
                    recorder.offer(&current, &current_eval);
                } else {
                    stagnation += 1;
                    longest_stagnation = longest_stagnation.max(stagnation);
                }

                recorder.step(&current_eval).map_err(SolverError::Trace)?;
                at_temperature += 1;
            }

            temperature = config.cool(temperature);
            temperature_steps += 1;
            best_history.push(recorder.snapshot());

            debug!(
                "T={temperature:.6} energy={:.4} unsat={} best_unsat={}",
                current_eval.energy,
                current_eval.unsatisfied,
                recorder.best().unsatisfied
            );
        }

        let iterations = recorder.steps();
        let best = recorder.into_best();
        let best_energy = best.energy(objective);
        debug!(
            "accepted {accepted_moves}/{iterations} moves, {improving_moves} improving, longest stagnation {longest_stagnation}"
        );
        info!(
            "finished '{}' after {iterations} steps: weight={}, unsatisfied={}",
            instance.name(),
            best.weight,
            best.unsatisfied
        );

        Ok(SaResult {
            best,
            best_energy,
            config: *config,
            iterations,
            temperature_steps,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            stagnation,
            longest_stagnation,
            stagnation_bound,
            best_history,
        })
    }
}

/// Metropolis acceptance criterion.
///
/// Non-worsening moves are always accepted without consuming randomness.
/// A worsening move is accepted with probability `exp(-delta / T)`.
pub fn accepts<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta <= 0.0 {
        return true;
    }
    let probability = (-delta / temperature).exp();
    rng.random_range(0.0..1.0) < probability
}
