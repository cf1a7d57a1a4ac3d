use crate::engines::generation::{gene_consumer::GeneConsumer, genome::BitString};
use crate::types::{Operator, Token, MAX_OPERAND};

/// Maps a chromosome's genes onto an alternating operator/operand sequence
#[derive(Debug, Clone, Copy)]
pub struct SemanticMapper {
    gene_width: usize,
}

impl SemanticMapper {
    pub fn new(gene_width: usize) -> Self {
        Self { gene_width }
    }

    /// Decode a bit string into `[op, digit, op, digit, ...]`.
    ///
    /// Genes are read left to right, starting out expecting an operator.
    /// A gene outside the expected class is skipped without changing the
    /// expectation. An operator left without a following operand at the end
    /// is dropped, so the result always has even length.
    pub fn decode(&self, bits: &BitString) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(bits.len() / self.gene_width.max(1));
        let mut expect_operator = true;

        for gene in GeneConsumer::new(bits, self.gene_width) {
            if expect_operator {
                if let Some(op) = Operator::from_code(gene) {
                    tokens.push(Token::Operator(op));
                    expect_operator = false;
                }
            } else if gene <= MAX_OPERAND {
                // gene <= 9 fits in u8
                tokens.push(Token::Operand(gene as u8));
                expect_operator = true;
            }
        }

        if !expect_operator {
            tokens.pop();
        }

        normalize_division_by_zero(&mut tokens);
        tokens
    }
}

/// Rewrite `/ 0` as `+ 0`. Only a directly following zero operand counts.
fn normalize_division_by_zero(tokens: &mut [Token]) {
    for i in 0..tokens.len().saturating_sub(1) {
        if tokens[i] == Token::Operator(Operator::Div) && tokens[i + 1] == Token::Operand(0) {
            tokens[i] = Token::Operator(Operator::Add);
        }
    }
}
