pub mod expression;
pub mod fitness;

pub use expression::evaluate;
pub use fitness::{Evaluation, FitnessEvaluator, SOLVED_FITNESS};
