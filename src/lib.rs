//! Evolves fixed-length bit strings into arithmetic expressions that
//! evaluate to a target number.
//!
//! Each chromosome is read as 4-bit genes (by default) that decode to an
//! alternating `operator, digit` sequence, folded left to right from zero.
//! A roulette-selection genetic algorithm with single-point crossover and
//! bit-flip mutation drives the population toward an exact hit.
//!
//! ```no_run
//! use genexpr::{solve, EvolutionConfig};
//!
//! let outcome = solve(EvolutionConfig::default(), 42.0)?;
//! if let Some(solution) = outcome.solution() {
//!     println!("{}", solution.expression);
//! }
//! # Ok::<(), genexpr::error::GenexprError>(())
//! ```

pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigManager, EvolutionConfig, RouletteMode};
pub use engines::evaluation::{FitnessEvaluator, SOLVED_FITNESS};
pub use engines::generation::{
    solve, BitString, Candidate, Chromosome, EngineState, EvolutionEngine, RunOutcome,
    SemanticMapper,
};
pub use types::{render_tokens, Operator, Token};
