use crate::{
    engines::evaluation::expression,
    engines::generation::{genome::BitString, semantic_mapper::SemanticMapper},
    types::Token,
};

/// Fitness stored for a chromosome whose expression hits the target exactly.
pub const SOLVED_FITNESS: f64 = 999.0;

/// Outcome of scoring one chromosome
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub tokens: Vec<Token>,
    pub value: f64,
    pub fitness: f64,
    pub solved: bool,
}

/// Scores chromosomes by how close their decoded expression lands to a target
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator {
    mapper: SemanticMapper,
    target: f64,
}

impl FitnessEvaluator {
    pub fn new(mapper: SemanticMapper, target: f64) -> Self {
        Self { mapper, target }
    }

    pub fn evaluate(&self, bits: &BitString) -> Evaluation {
        let tokens = self.mapper.decode(bits);
        let value = expression::evaluate(&tokens);
        let (fitness, solved) = score(value, self.target);

        Evaluation {
            tokens,
            value,
            fitness,
            solved,
        }
    }

    pub fn fitness(&self, bits: &BitString) -> f64 {
        self.evaluate(bits).fitness
    }
}

/// `1 / |target - value|` capped at `f64::MAX`, or [`SOLVED_FITNESS`] on an
/// exact hit. A non-finite value scores 0 so it never draws selection weight.
#[allow(clippy::float_cmp)]
pub fn score(value: f64, target: f64) -> (f64, bool) {
    if !value.is_finite() {
        return (0.0, false);
    }
    if value == target {
        return (SOLVED_FITNESS, true);
    }
    ((1.0 / (target - value).abs()).min(f64::MAX), false)
}
