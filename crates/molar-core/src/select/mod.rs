//! # Selection Language
//!
//! A small compiler from query strings to atom index sets: a lexer
//! ([`token`]), a recursive descent parser producing a [`Predicate`] tree
//! ([`parser`]) and an evaluator that tests every atom of an
//! [`AtomStore`](crate::core::models::store::AtomStore) against it ([`eval`]).
//!
//! ```ignore
//! use molar::select::select;
//!
//! let indices = select(&store, "resid 5:6 and name CA CB")?;
//! let heavy = select(&store, "protein and not hydrogen")?;
//! ```
//!
//! Attribute names come from the registry in
//! [`attribute`](crate::core::models::attribute); keywords are `all`, `none`,
//! `protein`, `backbone`, `sidechain`, `water` and `hydrogen`.

pub mod ast;
pub mod error;
pub mod eval;
pub mod keywords;
pub mod parser;
pub mod token;

pub use ast::Predicate;
pub use error::SelectionError;
pub use eval::Evaluator;
pub use parser::parse_query;

use crate::core::models::store::AtomStore;

/// Parses `query` and returns the ascending indices of matching atoms.
pub fn select(store: &AtomStore, query: &str) -> Result<Vec<usize>, SelectionError> {
    let predicate = parse_query(query)?;
    Ok(Evaluator::new(store).evaluate(&predicate))
}
