use super::error::LoadError;
use crate::core::masses::MassTable;
use crate::core::models::state::State;
use crate::core::models::topology::Topology;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading a structure file format.
///
/// A reader turns a file into the two index-aligned halves of a structure:
/// the [`Topology`] (atom identities) and the [`State`] (coordinates).
pub trait StructureFile {
    /// Reads a structure from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `masses` - The table used to assign a mass to each atom from its element.
    ///
    /// # Return
    ///
    /// Returns the topology and the state of the first model in the input.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails, a required record is missing, or
    /// I/O operations encounter issues.
    fn read_from(
        reader: &mut impl BufRead,
        masses: &MassTable,
    ) -> Result<(Topology, State), LoadError>;

    /// Reads a structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        masses: &MassTable,
    ) -> Result<(Topology, State), LoadError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, masses)
    }
}
