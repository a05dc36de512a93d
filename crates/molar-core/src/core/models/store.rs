use super::attribute::{Attribute, AttributeValue};
use super::state::State;
use super::topology::Topology;
use nalgebra::Point3;
use std::borrow::Cow;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Index {index} is out of range for {len} atoms")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("Topology has {topology} atoms but state has {state} coordinates")]
    LengthMismatch { topology: usize, state: usize },
}

/// Column-aligned storage for every attribute of every atom of one structure.
///
/// All columns have the same length. An atom's index is its offset into the
/// columns; it never changes while the store is alive. The shape of the store
/// is fixed at construction, while positions may be mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomStore {
    names: Vec<String>,
    resnames: Vec<String>,
    resids: Vec<i32>,
    chains: Vec<char>,
    elements: Vec<String>,
    masses: Vec<Option<f64>>,
    charges: Vec<f64>,
    positions: Vec<Point3<f64>>,
}

impl AtomStore {
    /// Assembles a store from the two halves of a loader result.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LengthMismatch`] if the topology and the state
    /// describe a different number of atoms.
    pub fn from_parts(topology: Topology, state: State) -> Result<Self, StoreError> {
        if topology.len() != state.len() {
            return Err(StoreError::LengthMismatch {
                topology: topology.len(),
                state: state.len(),
            });
        }

        let n = topology.len();
        let mut store = Self {
            names: Vec::with_capacity(n),
            resnames: Vec::with_capacity(n),
            resids: Vec::with_capacity(n),
            chains: Vec::with_capacity(n),
            elements: Vec::with_capacity(n),
            masses: Vec::with_capacity(n),
            charges: Vec::with_capacity(n),
            positions: state.into_coords(),
        };
        for atom in topology.into_atoms() {
            store.names.push(atom.name);
            store.resnames.push(atom.resname);
            store.resids.push(atom.resid);
            store.chains.push(atom.chain);
            store.elements.push(atom.element);
            store.masses.push(atom.mass);
            store.charges.push(atom.charge);
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn check(&self, index: usize) -> Result<(), StoreError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }

    pub fn position(&self, index: usize) -> Result<Point3<f64>, StoreError> {
        self.check(index)?;
        Ok(self.positions[index])
    }

    pub fn set_position(&mut self, index: usize, position: Point3<f64>) -> Result<(), StoreError> {
        self.check(index)?;
        self.positions[index] = position;
        Ok(())
    }

    pub fn position_mut(&mut self, index: usize) -> Result<&mut Point3<f64>, StoreError> {
        self.check(index)?;
        Ok(&mut self.positions[index])
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn name(&self, index: usize) -> Result<&str, StoreError> {
        self.check(index)?;
        Ok(&self.names[index])
    }

    pub fn set_name(&mut self, index: usize, name: &str) -> Result<(), StoreError> {
        self.check(index)?;
        self.names[index] = name.to_string();
        Ok(())
    }

    pub fn resname(&self, index: usize) -> Result<&str, StoreError> {
        self.check(index)?;
        Ok(&self.resnames[index])
    }

    pub fn resid(&self, index: usize) -> Result<i32, StoreError> {
        self.check(index)?;
        Ok(self.resids[index])
    }

    pub fn chain(&self, index: usize) -> Result<char, StoreError> {
        self.check(index)?;
        Ok(self.chains[index])
    }

    pub fn element(&self, index: usize) -> Result<&str, StoreError> {
        self.check(index)?;
        Ok(&self.elements[index])
    }

    /// Returns the mass of an atom, `None` when it is unknown.
    pub fn mass(&self, index: usize) -> Result<Option<f64>, StoreError> {
        self.check(index)?;
        Ok(self.masses[index])
    }

    pub fn charge(&self, index: usize) -> Result<f64, StoreError> {
        self.check(index)?;
        Ok(self.charges[index])
    }

    /// Reads an attribute by its registered name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownAttribute`] if `name` is not registered and
    /// [`StoreError::IndexOutOfRange`] if `index >= len()`.
    pub fn get_attribute(&self, index: usize, name: &str) -> Result<AttributeValue<'_>, StoreError> {
        let attr =
            Attribute::lookup(name).ok_or_else(|| StoreError::UnknownAttribute(name.to_string()))?;
        self.attribute(index, attr)
    }

    pub fn attribute(&self, index: usize, attr: Attribute) -> Result<AttributeValue<'_>, StoreError> {
        self.check(index)?;
        Ok(self.attribute_unchecked(index, attr))
    }

    /// Reads an attribute without the bound check. `index` must be `< len()`.
    pub(crate) fn attribute_unchecked(&self, index: usize, attr: Attribute) -> AttributeValue<'_> {
        match attr {
            Attribute::Index => AttributeValue::Integer(index as i64),
            Attribute::Name => AttributeValue::Text(Cow::Borrowed(&self.names[index])),
            Attribute::Resname => AttributeValue::Text(Cow::Borrowed(&self.resnames[index])),
            Attribute::Resid => AttributeValue::Integer(i64::from(self.resids[index])),
            Attribute::Chain => AttributeValue::Text(Cow::Owned(self.chains[index].to_string())),
            Attribute::Element => AttributeValue::Text(Cow::Borrowed(&self.elements[index])),
            Attribute::Mass => match self.masses[index] {
                Some(m) => AttributeValue::Float(m),
                None => AttributeValue::Missing,
            },
            Attribute::Charge => AttributeValue::Float(self.charges[index]),
            Attribute::X => AttributeValue::Float(self.positions[index].x),
            Attribute::Y => AttributeValue::Float(self.positions[index].y),
            Attribute::Z => AttributeValue::Float(self.positions[index].z),
        }
    }
}
