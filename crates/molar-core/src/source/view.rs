use super::error::MolarError;
use crate::core::models::store::AtomStore;
use nalgebra::Point3;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A live handle to one atom's position.
///
/// The view stores no coordinates of its own. Every read and write goes to
/// the store, so a write through one view is seen by every other view,
/// selection or particle that refers to the same atom.
#[derive(Debug, Clone)]
pub struct PosView {
    store: Weak<RefCell<AtomStore>>,
    index: usize,
}

impl PosView {
    pub(crate) fn new(store: Weak<RefCell<AtomStore>>, index: usize) -> Self {
        Self { store, index }
    }

    fn store(&self) -> Result<Rc<RefCell<AtomStore>>, MolarError> {
        self.store.upgrade().ok_or(MolarError::UseAfterRelease)
    }

    /// Index of the atom in the store.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self) -> Result<Point3<f64>, MolarError> {
        let store = self.store()?;
        let position = store.borrow().position(self.index)?;
        Ok(position)
    }

    pub fn set(&self, position: Point3<f64>) -> Result<(), MolarError> {
        let store = self.store()?;
        store.borrow_mut().set_position(self.index, position)?;
        Ok(())
    }

    /// Reads one coordinate; `axis` is 0, 1 or 2 for x, y and z.
    pub fn coord(&self, axis: usize) -> Result<f64, MolarError> {
        check_axis(axis)?;
        Ok(self.get()?[axis])
    }

    pub fn set_coord(&self, axis: usize, value: f64) -> Result<(), MolarError> {
        check_axis(axis)?;
        self.update(|p| p[axis] = value)
    }

    /// Applies `f` to the current position and stores the result.
    ///
    /// The store is not borrowed while `f` runs, so `f` may read other views
    /// of the same source.
    pub fn update<F>(&self, f: F) -> Result<(), MolarError>
    where
        F: FnOnce(&mut Point3<f64>),
    {
        let mut position = self.get()?;
        f(&mut position);
        self.set(position)
    }
}

fn check_axis(axis: usize) -> Result<(), MolarError> {
    if axis < 3 {
        Ok(())
    } else {
        Err(MolarError::IndexOutOfRange {
            index: axis,
            len: 3,
        })
    }
}
