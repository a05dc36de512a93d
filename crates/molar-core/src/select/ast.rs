//! Predicate tree produced by the parser.

use crate::core::models::attribute::{Attribute, AttributeValue};
use std::cmp::Ordering;

/// A compiled selection query.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        attr: Attribute,
        op: CmpOp,
        value: Literal,
    },
    /// Inclusive `lo:hi` range on a numeric attribute.
    Range {
        attr: Attribute,
        lo: Number,
        hi: Number,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
    Keyword(Keyword),
}

impl Predicate {
    pub fn and(lhs: Predicate, rhs: Predicate) -> Self {
        Predicate::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Predicate, rhs: Predicate) -> Self {
        Predicate::Or(Box::new(lhs), Box::new(rhs))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Predicate) -> Self {
        Predicate::Not(Box::new(inner))
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    /// Applies the operator to the ordering of `value` against the literal.
    ///
    /// `None` means the two were not comparable and never satisfies any
    /// operator, `!=` included.
    pub fn holds(self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return false;
        };
        match self {
            CmpOp::Eq => ordering == Ordering::Equal,
            CmpOp::Ne => ordering != Ordering::Equal,
            CmpOp::Lt => ordering == Ordering::Less,
            CmpOp::Le => ordering != Ordering::Greater,
            CmpOp::Gt => ordering == Ordering::Greater,
            CmpOp::Ge => ordering != Ordering::Less,
        }
    }

    pub fn is_ordering(self) -> bool {
        !matches!(self, CmpOp::Eq | CmpOp::Ne)
    }
}

/// A numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    /// Orders an attribute value relative to this number.
    ///
    /// Integers compare exactly; any float involvement compares as `f64`.
    /// Missing, text and NaN values yield `None`.
    pub fn compare_to(self, value: &AttributeValue<'_>) -> Option<Ordering> {
        match (value, self) {
            (AttributeValue::Integer(v), Number::Integer(n)) => Some(v.cmp(&n)),
            (AttributeValue::Integer(v), Number::Float(n)) => (*v as f64).partial_cmp(&n),
            (AttributeValue::Float(v), n) => v.partial_cmp(&n.as_f64()),
            _ => None,
        }
    }
}

/// A literal on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(Number),
    Text(TextPattern),
}

impl Literal {
    pub fn compare_to(&self, value: &AttributeValue<'_>) -> Option<Ordering> {
        match self {
            Literal::Number(n) => n.compare_to(value),
            Literal::Text(pattern) => {
                let text = value.as_text()?;
                Some(if pattern.matches(text) {
                    Ordering::Equal
                } else {
                    // Text has no order; any non-equal ordering stands for a mismatch.
                    Ordering::Less
                })
            }
        }
    }
}

/// Text matching pattern (supports `*` and `?` globs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPattern {
    Exact(String),
    Glob(String),
}

impl TextPattern {
    /// Builds a glob when the text contains wildcards, an exact match otherwise.
    pub fn from_word(word: &str) -> Self {
        if word.contains(['*', '?']) {
            TextPattern::Glob(word.to_string())
        } else {
            TextPattern::Exact(word.to_string())
        }
    }

    pub fn matches(&self, s: &str) -> bool {
        match self {
            TextPattern::Exact(pat) => s == pat,
            TextPattern::Glob(pat) => glob_match(pat, s),
        }
    }
}

fn glob_match(pattern: &str, text: &str) -> bool {
    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < txt.len() {
        if pi < pat.len() && (pat[pi] == '?' || pat[pi] == txt[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < pat.len() && pat[pi] == '*' {
            backtrack = Some((pi, ti));
            pi += 1;
        } else if let Some((star_pi, star_ti)) = backtrack {
            pi = star_pi + 1;
            ti = star_ti + 1;
            backtrack = Some((star_pi, star_ti + 1));
        } else {
            return false;
        }
    }
    pat[pi..].iter().all(|&c| c == '*')
}

/// Built-in named atom sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    All,
    None,
    Protein,
    Backbone,
    Sidechain,
    Water,
    Hydrogen,
}
