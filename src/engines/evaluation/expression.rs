use crate::types::Token;

/// Fold `(operator, operand)` pairs left to right starting from `0.0`.
///
/// There is no precedence: `+ 2 * 3` is `(0 + 2) * 3`. A trailing token
/// without a partner, or a pair not shaped `(operator, operand)`, contributes
/// nothing. Division follows IEEE semantics, so `/ 0` yields an infinity or
/// NaN that the caller must handle.
pub fn evaluate(tokens: &[Token]) -> f64 {
    tokens
        .chunks_exact(2)
        .fold(0.0, |acc, pair| match (pair[0], pair[1]) {
            (Token::Operator(op), Token::Operand(digit)) => op.apply(acc, f64::from(digit)),
            _ => acc,
        })
}
