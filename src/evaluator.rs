use log::{debug, warn};
use thiserror::Error;

use crate::{
    ast::{Token, TokenKind},
    parser::Parser,
    variables::VariableTable,
};

/// Errors that can occur during formula evaluation.
///
/// Evaluation never panics; a formula that cannot be computed comes back as
/// one of these values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Unbalanced parentheses, a missing operand, or two operands in a row
    #[error("Malformed expression at offset {position}: {message}")]
    MalformedExpression { position: usize, message: String },
}

/// Evaluates formula tokens against a variable table.
///
/// Tags are swapped for their values first, then the remaining numbers and
/// operators are parsed and computed with `f64` arithmetic. Division by zero
/// follows IEEE-754 and produces an infinity or NaN.
pub struct Evaluator<'v> {
    variables: &'v VariableTable,
}

impl<'v> Evaluator<'v> {
    pub fn new(variables: &'v VariableTable) -> Self {
        Evaluator { variables }
    }

    /// Replaces every tag with a `Number` token carrying its value.
    ///
    /// The substituted token keeps the tag's span, so parse errors still point
    /// into the original text.
    pub fn substitute(&self, tokens: &[Token]) -> Vec<Token> {
        tokens
            .iter()
            .map(|token| match (&token.kind, &token.name) {
                (TokenKind::VariableTag, Some(name)) => {
                    Token::number(self.variables.get(name).to_string(), token.span)
                }
                (TokenKind::VariableTag, None) => Token::number("0", token.span),
                _ => token.clone(),
            })
            .collect()
    }

    /// Evaluates a full token sequence. An empty sequence is `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tag_formula::{tokenize, Evaluator, VariableTable};
    ///
    /// let mut vars = VariableTable::new();
    /// vars.insert("a", 5.0);
    ///
    /// let tokens = tokenize("{{a}} * 2");
    /// let result = Evaluator::new(&vars).evaluate(&tokens).unwrap();
    /// assert_eq!(result, 10.0);
    /// ```
    pub fn evaluate(&self, tokens: &[Token]) -> Result<f64, EvalError> {
        if tokens.is_empty() {
            return Ok(0.0);
        }

        let substituted = self.substitute(tokens);
        debug!("evaluating {}", expression_text(&substituted));

        Parser::new(&substituted).parse().inspect_err(|e| {
            warn!("{}", e);
        })
    }
}

/// Infix text of a token sequence, one space between tokens.
///
/// Negative numbers are parenthesized so that a substituted `-3` after an
/// operator reads unambiguously.
pub fn expression_text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| {
            if token.kind == TokenKind::Number && token.raw.starts_with('-') {
                format!("({})", token.raw)
            } else {
                token.raw.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Evaluates `tokens` with `variables`; see [`Evaluator::evaluate`].
pub fn evaluate(tokens: &[Token], variables: &VariableTable) -> Result<f64, EvalError> {
    Evaluator::new(variables).evaluate(tokens)
}

/// Like [`evaluate`], with every error mapped to NaN.
pub fn evaluate_or_nan(tokens: &[Token], variables: &VariableTable) -> f64 {
    evaluate(tokens, variables).unwrap_or(f64::NAN)
}
