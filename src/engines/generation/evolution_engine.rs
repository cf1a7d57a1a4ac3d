use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::evaluation::{Evaluation, FitnessEvaluator};
use crate::engines::generation::{
    genome::{Chromosome, Population},
    operators::{crossover, mutate, random_chromosome, roulette_selection},
    progress::SilentProgressCallback,
    semantic_mapper::SemanticMapper,
};
use crate::error::{GenexprError, Result};
use crate::types::{render_tokens, Token};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Where the generation cycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Seeding,
    Evaluating,
    Reproducing,
    Solved,
    GenerationLimitExceeded,
}

impl EngineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, EngineState::Solved | EngineState::GenerationLimitExceeded)
    }
}

/// A scored chromosome reported back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub bits: String,
    pub tokens: Vec<Token>,
    pub expression: String,
    pub value: f64,
    pub fitness: f64,
}

impl Candidate {
    fn from_evaluation(chromosome: &Chromosome, evaluation: &Evaluation) -> Self {
        Self {
            bits: chromosome.bits.to_string(),
            expression: render_tokens(&evaluation.tokens),
            tokens: evaluation.tokens.clone(),
            value: evaluation.value,
            fitness: evaluation.fitness,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Solved {
        generation: usize,
        solution: Candidate,
    },
    GenerationLimitExceeded {
        limit: usize,
        /// Fittest chromosome of the last evaluated generation
        best: Option<Candidate>,
    },
}

impl RunOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, RunOutcome::Solved { .. })
    }

    pub fn solution(&self) -> Option<&Candidate> {
        match self {
            RunOutcome::Solved { solution, .. } => Some(solution),
            RunOutcome::GenerationLimitExceeded { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub total_fitness: f64,
    pub solved: bool,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, stats: &GenerationStats);
    fn on_run_complete(&mut self, outcome: &RunOutcome);
}

/// Result of evaluating one generation
struct EvaluatedGeneration {
    stats: GenerationStats,
    solved: Option<Candidate>,
    best: Option<Candidate>,
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    evaluator: FitnessEvaluator,
    population: Population,
    generation: usize,
    state: EngineState,
    rng: StdRng,
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig, target: f64) -> Result<Self> {
        config.validate()?;
        if !target.is_finite() {
            return Err(GenexprError::Configuration(format!(
                "Target must be a finite number, got {}",
                target
            )));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let evaluator = FitnessEvaluator::new(SemanticMapper::new(config.gene_width), target);

        Ok(Self {
            config,
            evaluator,
            population: Vec::new(),
            generation: 0,
            state: EngineState::Seeding,
            rng,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// Run the evolution process from a fresh population
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<RunOutcome> {
        self.state = EngineState::Seeding;
        self.generation = 0;
        self.population = self.initialize_population();

        loop {
            callback.on_generation_start(self.generation);

            self.state = EngineState::Evaluating;
            let evaluated = self.evaluate_population();
            log::debug!(
                "Generation {}: best {:.6}, mean {:.6}, total {:.6}",
                evaluated.stats.generation,
                evaluated.stats.best_fitness,
                evaluated.stats.mean_fitness,
                evaluated.stats.total_fitness
            );
            callback.on_generation_complete(&evaluated.stats);

            if let Some(solution) = evaluated.solved {
                self.state = EngineState::Solved;
                log::info!(
                    "Solved at generation {}: {} = {}",
                    self.generation, solution.expression, solution.value
                );
                let outcome = RunOutcome::Solved {
                    generation: self.generation,
                    solution,
                };
                callback.on_run_complete(&outcome);
                return Ok(outcome);
            }

            self.state = EngineState::Reproducing;
            self.population = self.create_next_generation(evaluated.stats.total_fitness)?;
            self.generation += 1;

            if self.generation > self.config.max_generations {
                self.state = EngineState::GenerationLimitExceeded;
                log::info!(
                    "Generation limit of {} exceeded without a solution",
                    self.config.max_generations
                );
                let outcome = RunOutcome::GenerationLimitExceeded {
                    limit: self.config.max_generations,
                    best: evaluated.best,
                };
                callback.on_run_complete(&outcome);
                return Ok(outcome);
            }
        }
    }

    fn initialize_population(&mut self) -> Population {
        (0..self.config.population_size)
            .map(|_| random_chromosome(self.config.chromosome_length, &mut self.rng))
            .collect()
    }

    /// Score every chromosome. Each fitness field is written exactly once.
    fn evaluate_population(&mut self) -> EvaluatedGeneration {
        let evaluator = self.evaluator;
        let evaluations: Vec<Evaluation> = if self.config.parallel_evaluation {
            self.population
                .par_iter()
                .map(|c| evaluator.evaluate(&c.bits))
                .collect()
        } else {
            self.population
                .iter()
                .map(|c| evaluator.evaluate(&c.bits))
                .collect()
        };

        for (chromosome, evaluation) in self.population.iter_mut().zip(&evaluations) {
            chromosome.fitness = evaluation.fitness;
        }

        let total_fitness: f64 = evaluations.iter().map(|e| e.fitness).sum();
        let best_idx = evaluations
            .iter()
            .enumerate()
            .max_by(|a, b| {
                a.1.fitness
                    .partial_cmp(&b.1.fitness)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i);
        let solved_idx = evaluations.iter().position(|e| e.solved);

        let candidate = |i: usize| Candidate::from_evaluation(&self.population[i], &evaluations[i]);

        EvaluatedGeneration {
            stats: GenerationStats {
                generation: self.generation,
                best_fitness: best_idx.map_or(0.0, |i| evaluations[i].fitness),
                mean_fitness: total_fitness / evaluations.len().max(1) as f64,
                total_fitness,
                solved: solved_idx.is_some(),
            },
            solved: solved_idx.map(candidate),
            best: best_idx.map(candidate),
        }
    }

    /// Build the next population alongside the current one; the current
    /// population is only read from until the caller swaps it out.
    fn create_next_generation(&mut self, total_fitness: f64) -> Result<Population> {
        let size = self.config.population_size;
        let mut next_generation = Vec::with_capacity(size);

        while next_generation.len() < size {
            let parent1 = roulette_selection(
                &self.population,
                total_fitness,
                self.config.roulette_mode,
                &mut self.rng,
            )
            .ok_or_else(|| GenexprError::Generation("Cannot select from an empty population".to_string()))?;
            let parent2 = roulette_selection(
                &self.population,
                total_fitness,
                self.config.roulette_mode,
                &mut self.rng,
            )
            .ok_or_else(|| GenexprError::Generation("Cannot select from an empty population".to_string()))?;

            let (mut child1, mut child2) =
                crossover(parent1, parent2, self.config.crossover_rate, &mut self.rng);

            mutate(&mut child1, self.config.mutation_rate, &mut self.rng);
            mutate(&mut child2, self.config.mutation_rate, &mut self.rng);

            next_generation.push(Chromosome::new(child1));
            next_generation.push(Chromosome::new(child2));
        }

        Ok(next_generation)
    }
}

/// Run once with no progress reporting
pub fn solve(config: EvolutionConfig, target: f64) -> Result<RunOutcome> {
    EvolutionEngine::new(config, target)?.run(SilentProgressCallback)
}
