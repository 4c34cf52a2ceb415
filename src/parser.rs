use crate::ast::{BinOp, Operator, Token, TokenKind};
use crate::evaluator::EvalError;

/// Nesting allowed for parentheses, signs and exponents combined.
pub const MAX_DEPTH: usize = 256;

/// Recursive-descent parser over substituted formula tokens.
///
/// Values are computed while parsing, so operator chains of any length run
/// in the `term`/`expr` loops and only nesting consumes stack. Nesting is
/// capped at [`MAX_DEPTH`].
///
/// The input must consist only of `Number` and `Operator` tokens; a
/// `VariableTag` reaching the parser is reported as malformed. Precedence,
/// lowest first:
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := unary (('*' | '/') unary)*
/// unary   := ('+' | '-') unary | power
/// power   := primary ('^' unary)?
/// primary := NUMBER | '(' expr ')'
/// ```
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn current_operator(&self) -> Option<Operator> {
        self.current().and_then(Token::operator_kind)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Source offset used in error messages: the current token's start, or
    /// the end of the last token once the input is exhausted.
    fn offset(&self) -> usize {
        match self.current() {
            Some(token) => token.span.start,
            None => self.tokens.last().map_or(0, |t| t.span.end),
        }
    }

    fn error(&self, message: impl Into<String>) -> EvalError {
        EvalError::MalformedExpression {
            position: self.offset(),
            message: message.into(),
        }
    }

    fn describe_current(&self) -> String {
        match self.current() {
            Some(token) => format!("'{}'", token.raw),
            None => "end of formula".to_string(),
        }
    }

    fn parse_primary(&mut self) -> Result<f64, EvalError> {
        let Some(token) = self.current() else {
            return Err(self.error("expected a number, found end of formula"));
        };

        match token.kind {
            TokenKind::Number => {
                let value = token
                    .number_value()
                    .ok_or_else(|| self.error(format!("invalid number '{}'", token.raw)))?;
                self.advance();
                Ok(value)
            }
            TokenKind::VariableTag => Err(self.error(format!("unresolved tag '{}'", token.raw))),
            TokenKind::Operator => match self.current_operator() {
                Some(Operator::LParen) => {
                    self.advance();
                    let expr = self.parse_additive()?;
                    if self.current_operator() != Some(Operator::RParen) {
                        return Err(self.error(format!(
                            "expected ')', found {}",
                            self.describe_current()
                        )));
                    }
                    self.advance();
                    Ok(expr)
                }
                _ => Err(self.error(format!(
                    "expected a number, found {}",
                    self.describe_current()
                ))),
            },
        }
    }

    fn parse_power(&mut self) -> Result<f64, EvalError> {
        let base = self.parse_primary()?;

        if self.current_operator() == Some(Operator::Caret) {
            self.advance();
            // Right-associative: the exponent may itself be a power
            let exponent = self.parse_unary()?;
            return Ok(BinOp::Power.apply(base, exponent));
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<f64, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("formula nests too deeply"));
        }

        self.depth += 1;
        let value = self.parse_signed();
        self.depth -= 1;
        value
    }

    fn parse_signed(&mut self) -> Result<f64, EvalError> {
        match self.current_operator() {
            Some(Operator::Minus) => {
                self.advance();
                Ok(-self.parse_unary()?)
            }
            Some(Operator::Plus) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_multiplicative(&mut self) -> Result<f64, EvalError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_operator() {
                Some(Operator::Star) => BinOp::Multiply,
                Some(Operator::Slash) => BinOp::Divide,
                _ => break,
            };

            self.advance();
            let right = self.parse_unary()?;

            left = op.apply(left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<f64, EvalError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_operator() {
                Some(Operator::Plus) => BinOp::Add,
                Some(Operator::Minus) => BinOp::Subtract,
                _ => break,
            };

            self.advance();
            let right = self.parse_multiplicative()?;

            left = op.apply(left, right);
        }
        Ok(left)
    }

    /// Parses and computes the whole token slice as one expression.
    pub fn parse(&mut self) -> Result<f64, EvalError> {
        let expr = self.parse_additive()?;

        match self.current() {
            None => Ok(expr),
            Some(_) if self.current_operator() == Some(Operator::RParen) => {
                Err(self.error("unmatched ')'"))
            }
            Some(_) => Err(self.error(format!(
                "expected an operator, found {}",
                self.describe_current()
            ))),
        }
    }
}
