use super::atom::Atom;
use std::collections::BTreeSet;

/// The ordered list of atom records read from a structure file.
///
/// A `Topology` is the identity half of a loader result; the coordinates are
/// carried by the matching [`State`](super::state::State).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    atoms: Vec<Atom>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Appends an atom and returns its index.
    pub fn push(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn into_atoms(self) -> Vec<Atom> {
        self.atoms
    }

    /// Counts distinct `(chain, resid)` pairs.
    pub fn residue_count(&self) -> usize {
        self.atoms
            .iter()
            .map(|a| (a.chain, a.resid))
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Returns the chain identifiers in order of first appearance.
    pub fn chains(&self) -> Vec<char> {
        let mut chains = Vec::new();
        for atom in &self.atoms {
            if !chains.contains(&atom.chain) {
                chains.push(atom.chain);
            }
        }
        chains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_topology() -> Topology {
        Topology::from_atoms(vec![
            Atom::new("N", "GLY", 1),
            Atom::new("CA", "GLY", 1),
            Atom::new("N", "ALA", 2),
            Atom::new("O", "HOH", 1).with_chain('W'),
        ])
    }

    #[test]
    fn push_returns_sequential_indices() {
        let mut topology = Topology::new();
        assert_eq!(topology.push(Atom::new("N", "GLY", 1)), 0);
        assert_eq!(topology.push(Atom::new("CA", "GLY", 1)), 1);
        assert_eq!(topology.len(), 2);
        assert!(!topology.is_empty());
    }

    #[test]
    fn residue_count_distinguishes_chains() {
        assert_eq!(sample_topology().residue_count(), 3);
    }

    #[test]
    fn chains_are_listed_in_order_of_appearance() {
        assert_eq!(sample_topology().chains(), vec!['A', 'W']);
    }
}
