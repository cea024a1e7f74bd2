//! Formula parser
//!
//! A recursive descent parser for cell formulas with the usual operator
//! precedence (multiplicative over additive, both left-associative):
//!
//! ```text
//! Formula    = "=" Expr
//! Expr       = Term ( ("+" | "-") Term )*
//! Term       = Factor ( ("*" | "/") Factor )*
//! Factor     = "(" Expr ")" | Identifier
//! Identifier = [A-Za-z0-9]+
//! ```
//!
//! The tokenizer consumes one character at a time and recognizes maximal runs
//! of letters and digits as identifiers. Whitespace is not part of the grammar
//! and fails the parse. The "zero-or-more" repetitions are implemented with a
//! single-token pushback rather than backtracking.

use crate::ast::{BinaryOperator, FormulaExpr};
use crate::error::{FormulaError, FormulaResult};
use std::iter::Peekable;
use std::str::Chars;

/// Parse a formula string into an expression tree
///
/// # Example
/// ```rust
/// use ripple_sheets_formula::parse_formula;
///
/// let expr = parse_formula("=A1+B2").unwrap();
/// let expr = parse_formula("=(A1+B2)*C3/D4").unwrap();
/// assert!(parse_formula("=A1 + B2").is_err()); // whitespace is not grammar
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let body = formula
        .strip_prefix('=')
        .ok_or_else(|| FormulaError::Parse("formula must start with '='".into()))?;

    let mut parser = FormulaParser::new(body);
    let expr = parser.parse_expression()?;

    // The grammar is "=" Expr and nothing else
    if let Some(token) = parser.next_token()? {
        return Err(FormulaError::Parse(format!(
            "unexpected {:?} after expression",
            token
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Identifier(String),
}

/// Formula parser state: the character stream plus at most one pushed-back
/// token
struct FormulaParser<'a> {
    chars: Peekable<Chars<'a>>,
    pushed_back: Option<Token>,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            pushed_back: None,
        }
    }

    // === Token scanning ===

    /// The next token, or `None` at end of input.
    ///
    /// End of input is only an error where a mandatory token is expected;
    /// the grammar productions decide that, not the tokenizer.
    fn next_token(&mut self) -> FormulaResult<Option<Token>> {
        if let Some(token) = self.pushed_back.take() {
            return Ok(Some(token));
        }

        let c = match self.chars.next() {
            Some(c) => c,
            None => return Ok(None),
        };

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            c if c.is_alphanumeric() => {
                let mut name = String::new();
                name.push(c);
                while let Some(&next) = self.chars.peek() {
                    if !next.is_alphanumeric() {
                        break;
                    }
                    name.push(next);
                    self.chars.next();
                }
                Token::Identifier(name)
            }
            c => {
                return Err(FormulaError::Parse(format!("unexpected character {:?}", c)));
            }
        };

        Ok(Some(token))
    }

    /// Push a token back so the next [`Self::next_token`] returns it again.
    ///
    /// Holds at most one token; pushing a second before consuming the first
    /// is a programming error, reported as a parse failure.
    fn unread_token(&mut self, token: Token) -> FormulaResult<()> {
        if self.pushed_back.is_some() {
            return Err(FormulaError::Parse(
                "cannot unread more than one token".into(),
            ));
        }
        self.pushed_back = Some(token);
        Ok(())
    }

    /// Consume the next token, failing if the input ends first.
    fn require_token(&mut self, expecting: &str) -> FormulaResult<Token> {
        self.next_token()?.ok_or_else(|| {
            FormulaError::Parse(format!("unexpected end of formula, expected {}", expecting))
        })
    }

    // === Grammar productions ===

    /// Expr = Term ( ("+" | "-") Term )*
    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.next_token()? {
                Some(Token::Plus) => BinaryOperator::Add,
                Some(Token::Minus) => BinaryOperator::Subtract,
                Some(token) => {
                    // Not part of this production; leave it for the caller.
                    self.unread_token(token)?;
                    break;
                }
                None => break,
            };

            let right = self.parse_term()?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Term = Factor ( ("*" | "/") Factor )*
    fn parse_term(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.next_token()? {
                Some(Token::Star) => BinaryOperator::Multiply,
                Some(Token::Slash) => BinaryOperator::Divide,
                Some(token) => {
                    self.unread_token(token)?;
                    break;
                }
                None => break,
            };

            let right = self.parse_factor()?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Factor = "(" Expr ")" | Identifier
    fn parse_factor(&mut self) -> FormulaResult<FormulaExpr> {
        match self.require_token("'(' or an identifier")? {
            Token::LeftParen => {
                let expr = self.parse_expression()?;
                match self.require_token("')'")? {
                    Token::RightParen => Ok(expr),
                    token => Err(FormulaError::Parse(format!(
                        "expected ')', got {:?}",
                        token
                    ))),
                }
            }
            Token::Identifier(name) => Ok(FormulaExpr::Reference(name)),
            token => Err(FormulaError::Parse(format!(
                "expected '(' or an identifier, got {:?}",
                token
            ))),
        }
    }
}
