use super::evolution_engine::{GenerationStats, ProgressCallback, RunOutcome};
use std::sync::mpsc::Sender;

/// Reports progress through the `log` facade
pub struct ConsoleProgressCallback {
    /// Log every n-th generation at info level; the rest go to debug.
    pub every: usize,
}

impl Default for ConsoleProgressCallback {
    fn default() -> Self {
        Self { every: 25 }
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::trace!("Generation {} starting...", generation);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        if self.every > 0 && stats.generation % self.every == 0 {
            log::info!(
                "Generation {} complete. Best fitness: {:.4}, mean: {:.4}",
                stats.generation, stats.best_fitness, stats.mean_fitness
            );
        }
    }

    fn on_run_complete(&mut self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Solved { generation, .. } => {
                log::info!("Solution found after {} generations", generation)
            }
            RunOutcome::GenerationLimitExceeded { limit, .. } => {
                log::info!("No solution found in {} generations", limit)
            }
        }
    }
}

/// Discards all progress events
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _stats: &GenerationStats) {}

    fn on_run_complete(&mut self, _outcome: &RunOutcome) {}
}

// For a shell driving the engine from another thread
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete(GenerationStats),
    Finished(RunOutcome),
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete(stats.clone()));
    }

    fn on_run_complete(&mut self, outcome: &RunOutcome) {
        let _ = self.sender.send(ProgressMessage::Finished(outcome.clone()));
    }
}
