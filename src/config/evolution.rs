use super::traits::ConfigSection;
use crate::error::GenexprError;
use serde::{Deserialize, Serialize};

/// Smallest gene width able to hold the operator codes 10..=13.
pub const MIN_GENE_WIDTH: usize = 4;
pub const MAX_GENE_WIDTH: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    /// Must be even: offspring are produced in pairs.
    pub population_size: usize,
    pub chromosome_length: usize,
    pub gene_width: usize,
    pub max_generations: usize,
    pub roulette_mode: RouletteMode,
    pub seed: Option<u64>,
    pub parallel_evaluation: bool,
}

/// How the roulette wheel draw is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouletteMode {
    /// Compare a [0, 1) draw against the raw running fitness sum.
    /// Early chromosomes win whenever total fitness exceeds 1.
    #[default]
    Unnormalized,
    /// Scale the draw by total fitness (textbook roulette).
    Normalized,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            crossover_rate: 0.7,
            mutation_rate: 0.1,
            population_size: 300,
            chromosome_length: 300,
            gene_width: 4,
            max_generations: 400,
            roulette_mode: RouletteMode::Unnormalized,
            seed: None,
            parallel_evaluation: true,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), GenexprError> {
        if self.population_size == 0 || self.population_size % 2 != 0 {
            return Err(GenexprError::Configuration(format!(
                "Population size must be a positive even number, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GenexprError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GenexprError::Configuration(
                "Crossover rate must be between 0 and 1".to_string()
            ));
        }
        if !(MIN_GENE_WIDTH..=MAX_GENE_WIDTH).contains(&self.gene_width) {
            return Err(GenexprError::Configuration(format!(
                "Gene width must be between {} and {} bits",
                MIN_GENE_WIDTH, MAX_GENE_WIDTH
            )));
        }
        if self.chromosome_length < self.gene_width {
            return Err(GenexprError::Configuration(
                "Chromosome length must hold at least one gene".to_string()
            ));
        }
        if self.max_generations == 0 {
            return Err(GenexprError::Configuration(
                "Generation limit must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}
