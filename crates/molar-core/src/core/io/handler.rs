use super::bgf::BgfFile;
use super::error::LoadError;
use super::pdb::PdbFile;
use super::traits::StructureFile;
use crate::core::masses::MassTable;
use crate::core::models::state::State;
use crate::core::models::topology::Topology;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Structure file formats understood by [`FileHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdb,
    Bgf,
}

impl FileFormat {
    /// Detects the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdb" | "ent" => Some(FileFormat::Pdb),
            "bgf" => Some(FileFormat::Bgf),
            _ => None,
        }
    }
}

/// An opened structure file that can be read exactly once.
///
/// ```ignore
/// let (topology, state) = FileHandler::open("protein.pdb")?.read()?;
/// let source = Source::new(topology, state)?;
/// ```
#[derive(Debug)]
pub struct FileHandler {
    path: PathBuf,
    format: FileFormat,
    masses: MassTable,
    reader: Option<BufReader<File>>,
}

impl FileHandler {
    /// Opens a structure file, detecting its format from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedFormat`] for unknown extensions and
    /// [`LoadError::Io`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)
            .ok_or_else(|| LoadError::UnsupportedFormat(path.display().to_string()))?;
        let file = File::open(path)?;
        debug!("Opened '{}' as {:?}.", path.display(), format);
        Ok(Self {
            path: path.to_path_buf(),
            format,
            masses: MassTable::new(),
            reader: Some(BufReader::new(file)),
        })
    }

    /// Replaces the mass table used to assign atom masses.
    pub fn with_masses(mut self, masses: MassTable) -> Self {
        self.masses = masses;
        self
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the structure.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Exhausted`] when called a second time, or any
    /// parse error of the underlying reader.
    pub fn read(&mut self) -> Result<(Topology, State), LoadError> {
        let mut reader = self
            .reader
            .take()
            .ok_or_else(|| LoadError::Exhausted(self.path.display().to_string()))?;
        match self.format {
            FileFormat::Pdb => PdbFile::read_from(&mut reader, &self.masses),
            FileFormat::Bgf => BgfFile::read_from(&mut reader, &self.masses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const PDB: &str = "\
ATOM      1  N   GLY A   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  GLY A   1       1.000   0.000   0.000  1.00  0.00           C
END
";

    fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn detects_formats_from_extensions() {
        assert_eq!(
            FileFormat::from_path(Path::new("a/protein.pdb")),
            Some(FileFormat::Pdb)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("x.ENT")),
            Some(FileFormat::Pdb)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("x.bgf")),
            Some(FileFormat::Bgf)
        );
        assert_eq!(FileFormat::from_path(Path::new("x.xyz")), None);
        assert_eq!(FileFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn open_and_read_pdb_file() {
        let file = temp_file(".pdb", PDB);
        let mut handler = FileHandler::open(file.path()).unwrap();
        assert_eq!(handler.format(), FileFormat::Pdb);

        let (topology, state) = handler.read().unwrap();
        assert_eq!(topology.len(), 2);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn second_read_is_exhausted() {
        let file = temp_file(".pdb", PDB);
        let mut handler = FileHandler::open(file.path()).unwrap();
        handler.read().unwrap();
        assert!(matches!(handler.read(), Err(LoadError::Exhausted(_))));
    }

    #[test]
    fn custom_mass_table_is_applied() {
        let file = temp_file(".pdb", PDB);
        let masses = MassTable::new().with_mass("C", 13.0).unwrap();
        let (topology, _) = FileHandler::open(file.path())
            .unwrap()
            .with_masses(masses)
            .read()
            .unwrap();
        assert_eq!(topology.atoms()[1].mass, Some(13.0));
    }

    #[test]
    fn open_rejects_unknown_extension() {
        let file = temp_file(".xyz", PDB);
        assert!(matches!(
            FileHandler::open(file.path()),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn open_reports_missing_file() {
        assert!(matches!(
            FileHandler::open("/nonexistent/protein.pdb"),
            Err(LoadError::Io(_))
        ));
    }
}
