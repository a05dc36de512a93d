//! Recursive descent parser for the selection language.

use super::ast::{CmpOp, Literal, Number, Predicate, TextPattern};
use super::error::SelectionError;
use super::keywords;
use super::token::{Lexer, SpannedToken, Token};
use crate::core::models::attribute::Attribute;
use tracing::debug;

/// Parser state wrapping a token stream.
pub struct Parser<'a> {
    tokens: Vec<SpannedToken>,
    pos: usize,
    input: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<SpannedToken>, input: &'a str) -> Self {
        Self {
            tokens,
            pos: 0,
            input,
        }
    }

    pub fn parse(mut self) -> Result<Predicate, SelectionError> {
        let predicate = self.parse_or()?;
        if !self.at_eof() {
            return Err(self.error_here(format!("unexpected {}", self.current().token)));
        }
        Ok(predicate)
    }

    fn current(&self) -> &SpannedToken {
        // The lexer always terminates the stream with `Eof`.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_next(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)].token
    }

    fn at_eof(&self) -> bool {
        self.current().token == Token::Eof
    }

    fn advance(&mut self) -> SpannedToken {
        let tok = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn error_here(&self, message: impl Into<String>) -> SelectionError {
        SelectionError::syntax(message, self.current().span.0, self.input)
    }

    fn error_at(&self, tok: &SpannedToken, message: impl Into<String>) -> SelectionError {
        SelectionError::syntax(message, tok.span.0, self.input)
    }

    // or_expr = and_expr ("or" and_expr)*
    fn parse_or(&mut self) -> Result<Predicate, SelectionError> {
        let mut left = self.parse_and()?;
        while self.current().token == Token::Or {
            self.advance();
            let right = self.parse_and()?;
            left = Predicate::or(left, right);
        }
        Ok(left)
    }

    // and_expr = not_expr ("and" not_expr)*
    fn parse_and(&mut self) -> Result<Predicate, SelectionError> {
        let mut left = self.parse_not()?;
        while self.current().token == Token::And {
            self.advance();
            let right = self.parse_not()?;
            left = Predicate::and(left, right);
        }
        Ok(left)
    }

    // not_expr = "not" not_expr | primary
    fn parse_not(&mut self) -> Result<Predicate, SelectionError> {
        if self.current().token == Token::Not {
            self.advance();
            let inner = self.parse_not()?;
            Ok(Predicate::not(inner))
        } else {
            self.parse_primary()
        }
    }

    // primary = "(" or_expr ")" | keyword | comparison
    fn parse_primary(&mut self) -> Result<Predicate, SelectionError> {
        match &self.current().token {
            Token::LParen => {
                let open = self.advance();
                let inner = self.parse_or()?;
                if self.current().token != Token::RParen {
                    let message = format!(
                        "expected ')' to close the '(' at column {}, found {}",
                        open.span.0 + 1,
                        self.current().token
                    );
                    return Err(self.error_here(message));
                }
                self.advance();
                Ok(inner)
            }
            Token::Word(word) => {
                if let Some(keyword) = keywords::lookup(word) {
                    self.advance();
                    return Ok(Predicate::Keyword(keyword));
                }
                match Attribute::lookup(word) {
                    Some(attr) => {
                        self.advance();
                        self.parse_comparison(attr)
                    }
                    None => Err(SelectionError::unknown_attribute(
                        word,
                        self.current().span.0,
                        self.input,
                    )),
                }
            }
            other => {
                let message = format!("expected a selection expression, found {}", other);
                Err(self.error_here(message))
            }
        }
    }

    // comparison = ATTR cmp_op value | ATTR item+
    fn parse_comparison(&mut self, attr: Attribute) -> Result<Predicate, SelectionError> {
        if let Some(op) = self.cmp_op() {
            let op_tok = self.advance();
            if op.is_ordering() && !attr.kind().is_numeric() {
                return Err(self.error_at(
                    &op_tok,
                    format!("ordering operator {} is not allowed on text attribute '{}'", op_tok.token, attr),
                ));
            }
            let value = self.parse_value(attr)?;
            return Ok(Predicate::Compare { attr, op, value });
        }

        if !self.current().token.is_value() {
            let message = format!("expected a value after '{}', found {}", attr, self.current().token);
            return Err(self.error_here(message));
        }

        let mut predicate = self.parse_item(attr)?;
        while self.current().token.is_value() {
            let next = self.parse_item(attr)?;
            predicate = Predicate::or(predicate, next);
        }
        Ok(predicate)
    }

    fn cmp_op(&self) -> Option<CmpOp> {
        match self.current().token {
            Token::Eq => Some(CmpOp::Eq),
            Token::Ne => Some(CmpOp::Ne),
            Token::Lt => Some(CmpOp::Lt),
            Token::Le => Some(CmpOp::Le),
            Token::Gt => Some(CmpOp::Gt),
            Token::Ge => Some(CmpOp::Ge),
            _ => None,
        }
    }

    // item = value | number ":" number
    fn parse_item(&mut self, attr: Attribute) -> Result<Predicate, SelectionError> {
        if self.current().token.is_number() && *self.peek_next() == Token::Colon {
            let lo_tok = self.advance();
            if !attr.kind().is_numeric() {
                return Err(self.error_at(
                    &lo_tok,
                    format!("range is not allowed on text attribute '{}'", attr),
                ));
            }
            self.advance();
            let hi_tok = self.current().clone();
            let (Some(lo), Some(hi)) = (number_of(&lo_tok.token), number_of(&hi_tok.token)) else {
                return Err(self.error_at(
                    &hi_tok,
                    format!("expected a number after ':', found {}", hi_tok.token),
                ));
            };
            self.advance();
            return Ok(Predicate::Range { attr, lo, hi });
        }

        let value = self.parse_value(attr)?;
        Ok(Predicate::Compare {
            attr,
            op: CmpOp::Eq,
            value,
        })
    }

    fn parse_value(&mut self, attr: Attribute) -> Result<Literal, SelectionError> {
        let tok = self.current().clone();
        let literal = if attr.kind().is_numeric() {
            match number_of(&tok.token) {
                Some(n) => Literal::Number(n),
                None if tok.token.is_value() => {
                    return Err(self.error_at(
                        &tok,
                        format!("expected a number for numeric attribute '{}', found {}", attr, tok.token),
                    ));
                }
                None => {
                    return Err(self.error_at(
                        &tok,
                        format!("expected a value after '{}', found {}", attr, tok.token),
                    ));
                }
            }
        } else {
            match &tok.token {
                Token::Word(word) => Literal::Text(TextPattern::from_word(word)),
                Token::Quoted(text) => Literal::Text(TextPattern::Exact(text.clone())),
                // Numbers on text attributes match their literal spelling, e.g. `chain 1`.
                Token::Integer(_) | Token::Float(_) => {
                    let raw = &self.input[tok.span.0..tok.span.1];
                    Literal::Text(TextPattern::Exact(raw.to_string()))
                }
                other => {
                    return Err(self.error_at(
                        &tok,
                        format!("expected a value after '{}', found {}", attr, other),
                    ));
                }
            }
        };
        self.advance();
        Ok(literal)
    }
}

fn number_of(token: &Token) -> Option<Number> {
    match token {
        Token::Integer(v) => Some(Number::Integer(*v)),
        Token::Float(v) => Some(Number::Float(*v)),
        _ => None,
    }
}

/// Parses a query string into a [`Predicate`].
///
/// # Errors
///
/// Returns [`SelectionError::Syntax`] for malformed queries and
/// [`SelectionError::UnknownAttribute`] for names that are neither keywords
/// nor registered attributes. No partial tree is ever returned.
pub fn parse_query(input: &str) -> Result<Predicate, SelectionError> {
    let tokens = Lexer::new(input).tokenize()?;
    let predicate = Parser::new(tokens, input).parse()?;
    debug!(query = input, "Compiled selection query.");
    Ok(predicate)
}
