//! Lexer for the selection language.

use super::error::SelectionError;
use std::fmt;

/// A token with its byte span in the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: (usize, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Boolean operators
    And,
    Or,
    Not,
    // Literals
    Word(String),
    Quoted(String),
    Integer(i64),
    Float(f64),
    // Punctuation / operators
    LParen,
    RParen,
    Colon,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // End
    Eof,
}

impl Token {
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Token::Word(_) | Token::Quoted(_) | Token::Integer(_) | Token::Float(_)
        )
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Token::Integer(_) | Token::Float(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::And => f.write_str("'and'"),
            Token::Or => f.write_str("'or'"),
            Token::Not => f.write_str("'not'"),
            Token::Word(w) => write!(f, "'{}'", w),
            Token::Quoted(s) => write!(f, "\"{}\"", s),
            Token::Integer(i) => write!(f, "{}", i),
            Token::Float(v) => write!(f, "{}", v),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Colon => f.write_str("':'"),
            Token::Eq => f.write_str("'=='"),
            Token::Ne => f.write_str("'!='"),
            Token::Lt => f.write_str("'<'"),
            Token::Le => f.write_str("'<='"),
            Token::Gt => f.write_str("'>'"),
            Token::Ge => f.write_str("'>='"),
            Token::Eof => f.write_str("end of query"),
        }
    }
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'_' | b'*' | b'?')
}

fn is_word_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'*' | b'?' | b'\'')
}

/// Lexer that tokenizes a selection query.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn err(&self, msg: impl Into<String>, start: usize) -> SelectionError {
        SelectionError::syntax(msg, start, self.input)
    }

    pub fn tokenize(&mut self) -> Result<Vec<SpannedToken>, SelectionError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let start = self.pos;
            let Some(ch) = self.peek() else {
                tokens.push(SpannedToken {
                    token: Token::Eof,
                    span: (start, start),
                });
                break;
            };
            let token = match ch {
                b'(' => {
                    self.pos += 1;
                    Token::LParen
                }
                b')' => {
                    self.pos += 1;
                    Token::RParen
                }
                b':' => {
                    self.pos += 1;
                    Token::Colon
                }
                b'=' => {
                    if self.peek_at(1) == Some(b'=') {
                        self.pos += 2;
                        Token::Eq
                    } else {
                        return Err(self.err("expected '==' operator", start));
                    }
                }
                b'!' => {
                    if self.peek_at(1) == Some(b'=') {
                        self.pos += 2;
                        Token::Ne
                    } else {
                        return Err(self.err("expected '!=' operator", start));
                    }
                }
                b'<' => {
                    self.pos += 1;
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        Token::Le
                    } else {
                        Token::Lt
                    }
                }
                b'>' => {
                    self.pos += 1;
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        Token::Ge
                    } else {
                        Token::Gt
                    }
                }
                b'"' | b'\'' => self.lex_quoted(ch)?,
                b'0'..=b'9' => self.lex_number()?,
                b'-' | b'+' if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                    self.lex_number()?
                }
                b if is_word_start(b) => self.lex_word(),
                _ => {
                    let shown = self.input[start..].chars().next().unwrap_or('?');
                    return Err(self.err(format!("unexpected character '{}'", shown), start));
                }
            };
            tokens.push(SpannedToken {
                token,
                span: (start, self.pos),
            });
        }
        Ok(tokens)
    }

    fn lex_quoted(&mut self, quote: u8) -> Result<Token, SelectionError> {
        let start = self.pos;
        self.pos += 1;
        let content_start = self.pos;
        while let Some(b) = self.peek() {
            if b == quote {
                let content = self.input[content_start..self.pos].to_string();
                self.pos += 1;
                return Ok(Token::Quoted(content));
            }
            self.pos += 1;
        }
        Err(self.err("unterminated quoted string", start))
    }

    fn eat_digits(&mut self) -> usize {
        let from = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - from
    }

    fn lex_number(&mut self) -> Result<Token, SelectionError> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        self.eat_digits();

        let mut is_float = false;
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            self.eat_digits();
            is_float = true;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let digit_at = if matches!(self.peek_at(1), Some(b'-' | b'+')) {
                2
            } else {
                1
            };
            if self.peek_at(digit_at).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += digit_at;
                self.eat_digits();
                is_float = true;
            }
        }

        // A number glued to identifier characters is a word, e.g. `1HB`.
        if self.peek().is_some_and(is_word_continue) {
            while self.peek().is_some_and(is_word_continue) {
                self.pos += 1;
            }
            return Ok(Token::Word(self.input[start..self.pos].to_string()));
        }

        let text = &self.input[start..self.pos];
        if is_float {
            text.parse()
                .map(Token::Float)
                .map_err(|_| self.err(format!("invalid number '{}'", text), start))
        } else {
            text.parse()
                .map(Token::Integer)
                .map_err(|_| self.err(format!("integer '{}' is out of range", text), start))
        }
    }

    fn lex_word(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(is_word_continue) {
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];
        match word.to_ascii_lowercase().as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            _ => Token::Word(word.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn basic_tokenize() {
        assert_eq!(
            kinds("name CA"),
            vec![Token::Word("name".into()), Token::Word("CA".into()), Token::Eof]
        );
    }

    #[test]
    fn range_tokens() {
        assert_eq!(
            kinds("resid 5:6"),
            vec![
                Token::Word("resid".into()),
                Token::Integer(5),
                Token::Colon,
                Token::Integer(6),
                Token::Eof
            ]
        );
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(kinds("resid 5:6"), kinds("  resid\t5 :  6 "));
    }

    #[test]
    fn comparison_ops() {
        assert_eq!(
            kinds(">= <= == != < >"),
            vec![
                Token::Ge,
                Token::Le,
                Token::Eq,
                Token::Ne,
                Token::Lt,
                Token::Gt,
                Token::Eof
            ]
        );
    }

    #[test]
    fn signed_and_float_numbers() {
        assert_eq!(
            kinds("-3:+2 1.5 2e3 -0.25"),
            vec![
                Token::Integer(-3),
                Token::Colon,
                Token::Integer(2),
                Token::Float(1.5),
                Token::Float(2000.0),
                Token::Float(-0.25),
                Token::Eof
            ]
        );
    }

    #[test]
    fn number_glued_to_letters_is_a_word() {
        assert_eq!(
            kinds("name 1HB 2H*"),
            vec![
                Token::Word("name".into()),
                Token::Word("1HB".into()),
                Token::Word("2H*".into()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn boolean_operators_are_case_insensitive() {
        assert_eq!(
            kinds("not a AND b Or c"),
            vec![
                Token::Not,
                Token::Word("a".into()),
                Token::And,
                Token::Word("b".into()),
                Token::Or,
                Token::Word("c".into()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn quoted_strings_keep_their_content() {
        assert_eq!(
            kinds("name \"C 1\" 'and'"),
            vec![
                Token::Word("name".into()),
                Token::Quoted("C 1".into()),
                Token::Quoted("and".into()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn spans_cover_tokens() {
        let tokens = Lexer::new("resid  12").tokenize().unwrap();
        assert_eq!(tokens[0].span, (0, 5));
        assert_eq!(tokens[1].span, (7, 9));
        assert_eq!(tokens[2].span, (9, 9));
    }

    #[test]
    fn invalid_input_reports_position() {
        let err = Lexer::new("resid = 5").tokenize().unwrap_err();
        assert_eq!(err.position(), 6);

        let err = Lexer::new("name 'CA").tokenize().unwrap_err();
        assert_eq!(err.position(), 5);

        let err = Lexer::new("resid 5 # 6").tokenize().unwrap_err();
        assert_eq!(err.position(), 8);

        let err = Lexer::new("resid 99999999999999999999").tokenize().unwrap_err();
        assert!(matches!(err, SelectionError::Syntax { .. }));
    }
}
