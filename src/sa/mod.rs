//! Simulated Annealing for Weighted MAX-SAT.
//!
//! A single-solution trajectory search over truth assignments. Each step
//! proposes a clause-guided single flip ([`NeighborGenerator`]), scores it
//! with the [`Objective`](crate::Objective) and accepts worsening moves
//! with a probability that shrinks as the temperature is cooled
//! geometrically.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Selman, Kautz & Cohen (1994), "Noise Strategies for Improving Local Search"

mod config;
mod neighbor;
mod runner;

pub use config::{ParamMode, SaConfig};
pub use neighbor::{Move, MoveKind, MoveStrategy, NeighborGenerator, DEFAULT_NOISE};
pub use runner::{accepts, SaResult, SaRunner};
