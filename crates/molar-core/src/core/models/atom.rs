/// Represents one atom record of a structure's topology.
///
/// An `Atom` carries the identity of an atom but not its coordinates; those
/// live in the index-aligned [`State`](super::state::State). The position of
/// the record inside its [`Topology`](super::topology::Topology) is the
/// atom's index for the whole lifetime of the structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The name of the parent residue (e.g., "ALA").
    pub resname: String,
    /// The residue sequence number as written in the source file.
    pub resid: i32,
    /// The single-character chain identifier.
    pub chain: char,
    /// The element symbol, upper-case (e.g., "C", "FE"). Empty if unknown.
    pub element: String,
    /// The atomic mass in Daltons, if known.
    pub mass: Option<f64>,
    /// The partial charge in elementary charge units.
    pub charge: f64,
}

impl Atom {
    /// Creates a new `Atom` with default values for the optional fields.
    ///
    /// The chain defaults to `'A'`, the element is left empty, the mass is
    /// unknown and the charge is zero.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `resname` - The name of the residue the atom belongs to.
    /// * `resid` - The residue sequence number.
    pub fn new(name: &str, resname: &str, resid: i32) -> Self {
        Self {
            name: name.to_string(),
            resname: resname.to_string(),
            resid,
            chain: 'A',
            element: String::new(),
            mass: None,
            charge: 0.0,
        }
    }

    pub fn with_chain(mut self, chain: char) -> Self {
        self.chain = chain;
        self
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.to_ascii_uppercase();
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }
}
