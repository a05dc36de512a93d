use super::{format_point, load_structure};
use crate::cli::InfoArgs;
use crate::error::Result;
use molar::core::masses::MassTable;
use molar::{MolarError, Source};
use nalgebra::Point3;
use std::fmt;
use tracing::info;

/// Summary printed by `molar info`.
#[derive(Debug)]
pub struct InfoReport {
    pub atoms: usize,
    pub residues: usize,
    pub chains: Vec<char>,
    pub com: Option<Point3<f64>>,
}

impl fmt::Display for InfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chains: String = self.chains.iter().collect();
        writeln!(f, "Atoms:          {}", self.atoms)?;
        writeln!(f, "Residues:       {}", self.residues)?;
        writeln!(f, "Chains:         {}", chains)?;
        match &self.com {
            Some(com) => write!(f, "Center of mass: {}", format_point(com)),
            None => write!(f, "Center of mass: n/a"),
        }
    }
}

pub fn run(args: InfoArgs, masses: MassTable) -> Result<()> {
    let report = summarize(&args, masses)?;
    println!("{}", report);
    Ok(())
}

fn summarize(args: &InfoArgs, masses: MassTable) -> Result<InfoReport> {
    let (topology, state) = load_structure(&args.file, masses)?;
    let residues = topology.residue_count();
    let chains = topology.chains();
    let source = Source::new(topology, state)?;
    info!("Loaded {} atoms in {} residues.", source.len(), residues);

    let com = match source.select_all().com() {
        Ok(com) => Some(com),
        Err(MolarError::EmptySelection | MolarError::ZeroTotalMass) => None,
        Err(e) => return Err(e.into()),
    };

    Ok(InfoReport {
        atoms: source.len(),
        residues,
        chains,
        com,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::io::Write;
    use std::path::PathBuf;

    const PDB: &str = "\
ATOM      1  N   GLY A   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  GLY A   1       2.000   0.000   0.000  1.00  0.00           C
ATOM      3  CA  ALA B   2       4.000   0.000   0.000  1.00  0.00           C
END
";

    #[test]
    fn summarizes_a_pdb_file() {
        let mut file = tempfile::Builder::new().suffix(".pdb").tempfile().unwrap();
        file.write_all(PDB.as_bytes()).unwrap();

        let args = InfoArgs {
            file: file.path().to_path_buf(),
        };
        let report = summarize(&args, MassTable::new()).unwrap();
        assert_eq!(report.atoms, 3);
        assert_eq!(report.residues, 2);
        assert_eq!(report.chains, vec!['A', 'B']);

        let text = report.to_string();
        assert!(text.contains("Chains:         AB"));
        assert!(text.contains("Center of mass: "));
    }

    #[test]
    fn reports_unreadable_files() {
        let args = InfoArgs {
            file: PathBuf::from("/nonexistent/protein.pdb"),
        };
        assert!(matches!(
            summarize(&args, MassTable::new()),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn empty_structure_has_no_center() {
        let report = InfoReport {
            atoms: 0,
            residues: 0,
            chains: vec![],
            com: None,
        };
        assert!(report.to_string().ends_with("Center of mass: n/a"));
    }
}
