use super::error::MolarError;
use super::view::PosView;
use crate::core::models::store::AtomStore;
use crate::select::{Evaluator, parse_query};
use nalgebra::{Point3, Vector3};
use std::cell::RefCell;
use std::iter::Copied;
use std::rc::{Rc, Weak};
use std::slice::Iter;

/// Weight used for atoms whose mass is unknown.
pub const DEFAULT_MASS: f64 = 1.0;

/// An ordered list of atom indices into a [`Source`](super::Source).
///
/// A selection does not own atoms; it aliases the source's store. Writes made
/// through one selection are immediately visible through every other
/// selection of the same source. Indices are resolved once, when the
/// selection is created.
#[derive(Debug, Clone)]
pub struct Sel {
    store: Weak<RefCell<AtomStore>>,
    indices: Rc<[usize]>,
}

impl Sel {
    pub(crate) fn new(store: Weak<RefCell<AtomStore>>, indices: Vec<usize>) -> Self {
        Self {
            store,
            indices: indices.into(),
        }
    }

    fn store(&self) -> Result<Rc<RefCell<AtomStore>>, MolarError> {
        self.store.upgrade().ok_or(MolarError::UseAfterRelease)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates the store indices of the selected atoms in selection order.
    ///
    /// The iterator is cheap to clone, so it can be restarted.
    pub fn indices(&self) -> Copied<Iter<'_, usize>> {
        self.indices.iter().copied()
    }

    /// Returns the store index of the `k`-th selected atom.
    pub fn index(&self, k: usize) -> Result<usize, MolarError> {
        self.indices
            .get(k)
            .copied()
            .ok_or(MolarError::IndexOutOfRange {
                index: k,
                len: self.len(),
            })
    }

    /// Returns a live view of the `k`-th selected atom's position.
    ///
    /// # Errors
    ///
    /// [`MolarError::IndexOutOfRange`] if `k >= len()`, and
    /// [`MolarError::UseAfterRelease`] if the source has been dropped.
    pub fn nth(&self, k: usize) -> Result<PosView, MolarError> {
        self.store()?;
        let index = self.index(k)?;
        Ok(PosView::new(self.store.clone(), index))
    }

    /// Iterates the selected atoms as [`Particle`] handles.
    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        self.indices().map(|index| Particle {
            store: self.store.clone(),
            index,
        })
    }

    /// Copies out the current positions of the selected atoms.
    pub fn positions(&self) -> Result<Vec<Point3<f64>>, MolarError> {
        let store = self.store()?;
        let store = store.borrow();
        self.indices()
            .map(|i| store.position(i).map_err(MolarError::from))
            .collect()
    }

    /// Mass-weighted center of the selected atoms.
    ///
    /// Atoms with an unknown mass weigh [`DEFAULT_MASS`]. The sum runs over
    /// offsets from the first selected atom. A selection of a single atom
    /// returns that atom's position exactly, regardless of its mass.
    ///
    /// # Errors
    ///
    /// [`MolarError::EmptySelection`] if nothing is selected and
    /// [`MolarError::ZeroTotalMass`] if the selection spans more than one
    /// atom and the weights sum to zero.
    pub fn com(&self) -> Result<Point3<f64>, MolarError> {
        let store = self.store()?;
        let store = store.borrow();
        weighted_center(&store, &self.indices, |i| {
            Ok(store.mass(i)?.unwrap_or(DEFAULT_MASS))
        })
    }

    /// Unweighted center of the selected atoms.
    pub fn cog(&self) -> Result<Point3<f64>, MolarError> {
        let store = self.store()?;
        let store = store.borrow();
        weighted_center(&store, &self.indices, |_| Ok(1.0))
    }

    /// Shifts every selected atom by `shift`.
    ///
    /// An index that occurs more than once is shifted once per occurrence.
    pub fn translate(&self, shift: &Vector3<f64>) -> Result<(), MolarError> {
        let store = self.store()?;
        let mut store = store.borrow_mut();
        for i in self.indices() {
            *store.position_mut(i)? += *shift;
        }
        Ok(())
    }

    /// Selects the atoms of this selection that match `query`, keeping this
    /// selection's order.
    pub fn select_str(&self, query: &str) -> Result<Sel, MolarError> {
        let predicate = parse_query(query)?;
        let store = self.store()?;
        let matched = Evaluator::new(&store.borrow()).evaluate_over(&predicate, self.indices())?;
        Ok(Sel::new(self.store.clone(), matched))
    }
}

fn weighted_center<F>(store: &AtomStore, indices: &[usize], weight: F) -> Result<Point3<f64>, MolarError>
where
    F: Fn(usize) -> Result<f64, MolarError>,
{
    let first = *indices.first().ok_or(MolarError::EmptySelection)?;
    let origin = store.position(first)?;
    if indices.iter().all(|&i| i == first) {
        return Ok(origin);
    }

    let mut total = 0.0;
    let mut moment = Vector3::zeros();
    for &i in indices {
        let w = weight(i)?;
        moment += (store.position(i)? - origin) * w;
        total += w;
    }
    if total == 0.0 {
        return Err(MolarError::ZeroTotalMass);
    }
    Ok(origin + moment / total)
}

/// One atom of a selection: its index plus live attribute accessors.
#[derive(Debug, Clone)]
pub struct Particle {
    store: Weak<RefCell<AtomStore>>,
    index: usize,
}

impl Particle {
    fn store(&self) -> Result<Rc<RefCell<AtomStore>>, MolarError> {
        self.store.upgrade().ok_or(MolarError::UseAfterRelease)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pos(&self) -> PosView {
        PosView::new(self.store.clone(), self.index)
    }

    pub fn name(&self) -> Result<String, MolarError> {
        Ok(self.store()?.borrow().name(self.index)?.to_string())
    }

    /// Renames the atom; the change is seen by every selection of the source.
    pub fn set_name(&self, name: &str) -> Result<(), MolarError> {
        self.store()?.borrow_mut().set_name(self.index, name)?;
        Ok(())
    }

    pub fn resname(&self) -> Result<String, MolarError> {
        Ok(self.store()?.borrow().resname(self.index)?.to_string())
    }

    pub fn resid(&self) -> Result<i32, MolarError> {
        Ok(self.store()?.borrow().resid(self.index)?)
    }

    pub fn chain(&self) -> Result<char, MolarError> {
        Ok(self.store()?.borrow().chain(self.index)?)
    }

    pub fn element(&self) -> Result<String, MolarError> {
        Ok(self.store()?.borrow().element(self.index)?.to_string())
    }

    /// Mass of the atom, `None` when unknown.
    pub fn mass(&self) -> Result<Option<f64>, MolarError> {
        Ok(self.store()?.borrow().mass(self.index)?)
    }

    /// Reads any registered attribute by name, formatted as text.
    pub fn attribute(&self, name: &str) -> Result<String, MolarError> {
        Ok(self.store()?.borrow().get_attribute(self.index, name)?.to_string())
    }
}
