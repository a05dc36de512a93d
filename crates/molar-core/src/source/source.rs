use super::error::MolarError;
use super::sel::Sel;
use crate::core::io::FileHandler;
use crate::core::masses::MassTable;
use crate::core::models::state::State;
use crate::core::models::store::AtomStore;
use crate::core::models::topology::Topology;
use crate::select::{Evaluator, Predicate, parse_query};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, instrument};

/// The owner of one structure's atom store.
///
/// Selections created from a source alias its store. They stay valid only as
/// long as the source is alive; after it is dropped every access through
/// them fails with [`MolarError::UseAfterRelease`].
#[derive(Debug)]
pub struct Source {
    store: Rc<RefCell<AtomStore>>,
}

impl Source {
    /// Builds a source from a loader result.
    ///
    /// # Errors
    ///
    /// Returns [`MolarError::Inconsistent`] if the topology and the state do
    /// not describe the same number of atoms.
    pub fn new(topology: Topology, state: State) -> Result<Self, MolarError> {
        Ok(Self::from_store(AtomStore::from_parts(topology, state)?))
    }

    pub fn from_store(store: AtomStore) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
        }
    }

    /// Loads a structure file using the standard mass table.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MolarError> {
        Self::from_file_with_masses(path, MassTable::new())
    }

    #[instrument(skip_all, name = "source_from_file")]
    pub fn from_file_with_masses<P: AsRef<Path>>(
        path: P,
        masses: MassTable,
    ) -> Result<Self, MolarError> {
        let (topology, state) = FileHandler::open(path)?.with_masses(masses).read()?;
        let source = Self::new(topology, state)?;
        debug!(atoms = source.len(), "Source created.");
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().is_empty()
    }

    /// Selects every atom, in store order.
    pub fn select_all(&self) -> Sel {
        Sel::new(Rc::downgrade(&self.store), (0..self.len()).collect())
    }

    /// Compiles `query` and selects the matching atoms in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`MolarError::Selection`] with the parser's error unchanged.
    pub fn select_str(&self, query: &str) -> Result<Sel, MolarError> {
        let predicate = parse_query(query)?;
        Ok(self.select_predicate(&predicate))
    }

    /// Selects an explicit list of atoms. Order and duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns [`MolarError::IndexOutOfRange`] for the first index that is
    /// not in the store.
    pub fn select_indices<I>(&self, indices: I) -> Result<Sel, MolarError>
    where
        I: IntoIterator<Item = usize>,
    {
        let len = self.len();
        let indices = indices
            .into_iter()
            .map(|index| {
                if index < len {
                    Ok(index)
                } else {
                    Err(MolarError::IndexOutOfRange { index, len })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Sel::new(Rc::downgrade(&self.store), indices))
    }

    /// Selects the atoms matching an already compiled predicate.
    pub fn select_predicate(&self, predicate: &Predicate) -> Sel {
        let indices = Evaluator::new(&self.store.borrow()).evaluate(predicate);
        Sel::new(Rc::downgrade(&self.store), indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::select::SelectionError;
    use nalgebra::Point3;
    use std::io::Write;

    fn source() -> Source {
        let atoms = vec![
            Atom::new("N", "GLY", 1).with_element("N").with_mass(14.007),
            Atom::new("CA", "GLY", 1).with_element("C").with_mass(12.011),
            Atom::new("CA", "ALA", 2).with_element("C").with_mass(12.011),
            Atom::new("ZN", "ZN", 3).with_chain('B'),
        ];
        let coords = (0..atoms.len())
            .map(|i| Point3::new(i as f64, 1.0, 2.0))
            .collect();
        Source::new(Topology::from_atoms(atoms), State::from_coords(coords)).unwrap()
    }

    #[test]
    fn select_all_covers_the_store() {
        let source = source();
        let all = source.select_all();
        assert_eq!(all.len(), source.len());
        assert_eq!(all.indices().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn resid_selection_counts_match_store() {
        let source = source();
        for r in 1..=3 {
            let expected = source
                .select_all()
                .iter()
                .filter(|p| p.resid().unwrap() == r)
                .count();
            let sel = source.select_str(&format!("resid {r}:{r}")).unwrap();
            assert_eq!(sel.len(), expected);
        }
    }

    #[test]
    fn selections_alias_the_same_store() {
        let source = source();
        let a = source.select_str("name CA").unwrap();
        let b = source.select_str("resname ALA").unwrap();

        a.nth(1).unwrap().set(Point3::new(-1.0, -2.0, -3.0)).unwrap();
        assert_eq!(b.nth(0).unwrap().get().unwrap(), Point3::new(-1.0, -2.0, -3.0));

        b.nth(0).unwrap().update(|p| p.z = 0.0).unwrap();
        assert_eq!(a.positions().unwrap()[1], Point3::new(-1.0, -2.0, 0.0));
    }

    #[test]
    fn parser_errors_propagate_unchanged() {
        let source = source();
        let err = source.select_str("resi 5").unwrap_err();
        assert!(matches!(
            err,
            MolarError::Selection(SelectionError::UnknownAttribute { ref name, position: 0, .. })
                if name == "resi"
        ));
        assert!(matches!(
            source.select_str("resid 5:"),
            Err(MolarError::Selection(SelectionError::Syntax { .. }))
        ));
    }

    #[test]
    fn missing_masses_are_excluded_but_complemented() {
        let source = source();
        assert_eq!(source.select_str("mass 10:20").unwrap().len(), 3);
        let rest = source.select_str("not mass 10:20").unwrap();
        assert_eq!(rest.indices().collect::<Vec<_>>(), vec![3]);
        // Unknown masses weigh 1.0 in the center of mass.
        assert_eq!(rest.com().unwrap(), Point3::new(3.0, 1.0, 2.0));
    }

    #[test]
    fn select_indices_keeps_order_and_checks_bounds() {
        let source = source();
        let sel = source.select_indices([3, 0, 3]).unwrap();
        assert_eq!(sel.indices().collect::<Vec<_>>(), vec![3, 0, 3]);
        assert!(matches!(
            source.select_indices([1, 4]),
            Err(MolarError::IndexOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn new_rejects_mismatched_parts() {
        let topology = Topology::from_atoms(vec![Atom::new("N", "GLY", 1)]);
        assert!(matches!(
            Source::new(topology, State::new()),
            Err(MolarError::Inconsistent(_))
        ));
    }

    #[test]
    fn from_file_loads_pdb() {
        let mut file = tempfile::Builder::new().suffix(".pdb").tempfile().unwrap();
        write!(
            file,
            "\
ATOM      1  N   GLY A   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  GLY A   1       1.000   0.000   0.000  1.00  0.00           C
END
"
        )
        .unwrap();

        let source = Source::from_file(file.path()).unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(source.select_str("element C").unwrap().len(), 1);
        assert!(matches!(
            Source::from_file("/nonexistent/x.pdb"),
            Err(MolarError::Load { .. })
        ));
    }

    #[test]
    fn empty_source() {
        let source = Source::from_store(AtomStore::default());
        assert!(source.is_empty());
        assert!(source.select_all().is_empty());
        assert!(matches!(source.select_all().com(), Err(MolarError::EmptySelection)));
    }
}
