use serde::{Deserialize, Serialize};
use std::fmt;

/// Gene value that decodes to `+`. Operators occupy the four codes from here.
pub const OPERATOR_BASE: u32 = 10;

/// Largest gene value that still decodes to an operand digit.
pub const MAX_OPERAND: u32 = 9;

/// Arithmetic operator carried by an operator gene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// In code order, starting at [`OPERATOR_BASE`].
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn from_code(code: u32) -> Option<Self> {
        let offset = code.checked_sub(OPERATOR_BASE)?;
        Self::ALL.get(offset as usize).copied()
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Apply this operator with `acc` on the left-hand side.
    pub fn apply(self, acc: f64, operand: f64) -> f64 {
        match self {
            Operator::Add => acc + operand,
            Operator::Sub => acc - operand,
            Operator::Mul => acc * operand,
            Operator::Div => acc / operand,
        }
    }
}

/// Decoded meaning of a single gene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    Operand(u8),
    Operator(Operator),
}

impl Token {
    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operand(digit) => write!(f, "{}", digit),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
        }
    }
}

/// Render a decoded expression for display.
///
/// The leading `0` stands for the implicit starting accumulator; it is not
/// part of the chromosome.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::from("0");
    for token in tokens {
        out.push(' ');
        out.push_str(&token.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_codes_follow_base() {
        assert_eq!(Operator::from_code(10), Some(Operator::Add));
        assert_eq!(Operator::from_code(11), Some(Operator::Sub));
        assert_eq!(Operator::from_code(12), Some(Operator::Mul));
        assert_eq!(Operator::from_code(13), Some(Operator::Div));
        for (offset, op) in Operator::ALL.into_iter().enumerate() {
            assert_eq!(Operator::from_code(OPERATOR_BASE + offset as u32), Some(op));
        }
        assert!(Operator::from_code(MAX_OPERAND).is_none());
        assert!(Operator::from_code(0).is_none());
        assert!(Operator::from_code(14).is_none());
    }

    #[test]
    fn test_render_tokens_prefixes_zero() {
        let tokens = vec![
            Token::Operator(Operator::Add),
            Token::Operand(5),
            Token::Operator(Operator::Div),
            Token::Operand(2),
        ];
        assert_eq!(render_tokens(&tokens), "0 + 5 / 2");
        assert_eq!(render_tokens(&[]), "0");
    }
}
