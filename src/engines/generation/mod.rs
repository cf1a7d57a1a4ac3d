pub mod genome;
pub mod gene_consumer;
pub mod semantic_mapper;
pub mod operators;
pub mod evolution_engine;
pub mod progress;

pub use genome::{BitString, Chromosome, Population};
pub use semantic_mapper::SemanticMapper;
pub use evolution_engine::{
    solve, Candidate, EngineState, EvolutionEngine, GenerationStats, ProgressCallback, RunOutcome,
};
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, ProgressMessage, SilentProgressCallback};
