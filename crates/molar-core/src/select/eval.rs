//! Evaluates predicates against an [`AtomStore`].

use super::ast::{CmpOp, Keyword, Predicate};
use super::keywords;
use crate::core::models::store::{AtomStore, StoreError};
use tracing::trace;

/// Tests atoms of one store against compiled predicates.
///
/// Each atom is tested independently with short-circuiting boolean
/// composition. Comparisons on missing or incomparable values (an unknown
/// mass, a NaN coordinate) are false for that atom only; evaluation itself
/// cannot fail.
pub struct Evaluator<'a> {
    store: &'a AtomStore,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a AtomStore) -> Self {
        Self { store }
    }

    /// Returns the ascending indices of every atom matching `predicate`.
    pub fn evaluate(&self, predicate: &Predicate) -> Vec<usize> {
        let matched: Vec<usize> = (0..self.store.len())
            .filter(|&i| self.test(predicate, i))
            .collect();
        trace!(
            matched = matched.len(),
            total = self.store.len(),
            "Evaluated selection over the full store."
        );
        matched
    }

    /// Filters `domain` down to the atoms matching `predicate`, keeping the
    /// domain's order and duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if the domain names an atom
    /// outside the store.
    pub fn evaluate_over<I>(&self, predicate: &Predicate, domain: I) -> Result<Vec<usize>, StoreError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut matched = Vec::new();
        let mut total = 0usize;
        for i in domain {
            total += 1;
            if self.matches(predicate, i)? {
                matched.push(i);
            }
        }
        trace!(matched = matched.len(), total, "Evaluated selection over a subset.");
        Ok(matched)
    }

    /// Tests a single atom.
    pub fn matches(&self, predicate: &Predicate, index: usize) -> Result<bool, StoreError> {
        if index >= self.store.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.store.len(),
            });
        }
        Ok(self.test(predicate, index))
    }

    fn test(&self, predicate: &Predicate, i: usize) -> bool {
        match predicate {
            Predicate::And(lhs, rhs) => self.test(lhs, i) && self.test(rhs, i),
            Predicate::Or(lhs, rhs) => self.test(lhs, i) || self.test(rhs, i),
            Predicate::Not(inner) => !self.test(inner, i),
            Predicate::Compare { attr, op, value } => {
                let actual = self.store.attribute_unchecked(i, *attr);
                op.holds(value.compare_to(&actual))
            }
            Predicate::Range { attr, lo, hi } => {
                let actual = self.store.attribute_unchecked(i, *attr);
                CmpOp::Ge.holds(lo.compare_to(&actual)) && CmpOp::Le.holds(hi.compare_to(&actual))
            }
            Predicate::Keyword(keyword) => self.test_keyword(*keyword, i),
        }
    }

    fn test_keyword(&self, keyword: Keyword, i: usize) -> bool {
        let store = self.store;
        let resname = || store.resname(i).unwrap_or_default();
        let name = || store.name(i).unwrap_or_default();
        match keyword {
            Keyword::All => true,
            Keyword::None => false,
            Keyword::Protein => keywords::is_protein_residue(resname()),
            Keyword::Water => keywords::is_water_residue(resname()),
            Keyword::Backbone => {
                keywords::is_protein_residue(resname()) && keywords::is_backbone_atom(name())
            }
            Keyword::Sidechain => {
                keywords::is_protein_residue(resname()) && !keywords::is_backbone_atom(name())
            }
            Keyword::Hydrogen => keywords::is_hydrogen_element(store.element(i).unwrap_or_default()),
        }
    }
}
