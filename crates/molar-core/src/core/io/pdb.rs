use super::error::{LoadError, ParseErrorKind};
use super::traits::StructureFile;
use super::util::{guess_element, parse_float, parse_int, slice_and_trim};
use crate::core::masses::MassTable;
use crate::core::models::atom::Atom;
use crate::core::models::state::State;
use crate::core::models::topology::Topology;
use nalgebra::Point3;
use std::io::BufRead;
use tracing::{debug, instrument, warn};

// Coordinates end at column 54; everything after is optional.
const MIN_ATOM_LINE_LEN: usize = 54;

/// Reader for the fixed-column Protein Data Bank format.
///
/// Only `ATOM`/`HETATM` records of the first model are read. Reading stops at
/// the first `ENDMDL` or `END` record.
pub struct PdbFile;

impl StructureFile for PdbFile {
    #[instrument(skip_all, name = "pdb_reader")]
    fn read_from(
        reader: &mut impl BufRead,
        masses: &MassTable,
    ) -> Result<(Topology, State), LoadError> {
        let mut topology = Topology::new();
        let mut state = State::new();
        let mut unknown_elements = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_ATOM_LINE_LEN {
                        return Err(LoadError::Parse {
                            line: line_num,
                            kind: ParseErrorKind::LineTooShort {
                                min: MIN_ATOM_LINE_LEN,
                            },
                        });
                    }

                    let name = slice_and_trim(&line, 12, 16);
                    let resname = slice_and_trim(&line, 17, 20);
                    let chain_str = slice_and_trim(&line, 21, 22);
                    let resid_str = slice_and_trim(&line, 22, 26);
                    let x_str = slice_and_trim(&line, 30, 38);
                    let y_str = slice_and_trim(&line, 38, 46);
                    let z_str = slice_and_trim(&line, 46, 54);
                    let element_str = slice_and_trim(&line, 76, 78);
                    let charge_str = slice_and_trim(&line, 78, 80);

                    if name.is_empty() {
                        return Err(LoadError::Parse {
                            line: line_num,
                            kind: ParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }

                    let resid: i32 = parse_int(resid_str, line_num, "23-26")?;
                    let x = parse_float(x_str, line_num, "31-38")?;
                    let y = parse_float(y_str, line_num, "39-46")?;
                    let z = parse_float(z_str, line_num, "47-54")?;
                    let chain = chain_str.chars().next().unwrap_or('A');

                    let element = if element_str.is_empty() {
                        guess_element(name, record_type == "HETATM", masses)
                    } else {
                        element_str.to_ascii_uppercase()
                    };
                    let mass = masses.mass_of(&element);
                    if mass.is_none() {
                        unknown_elements += 1;
                    }

                    let mut atom = Atom::new(name, resname, resid)
                        .with_chain(chain)
                        .with_element(&element)
                        .with_charge(parse_formal_charge(charge_str));
                    atom.mass = mass;

                    topology.push(atom);
                    state.push(Point3::new(x, y, z));
                }
                "ENDMDL" | "END" => break,
                _ => {}
            }
        }

        if topology.is_empty() {
            return Err(LoadError::MissingRecord("ATOM/HETATM records".into()));
        }
        if unknown_elements > 0 {
            warn!(
                "{} atom(s) have an unknown element; their mass is unset.",
                unknown_elements
            );
        }
        debug!("Read {} atoms from PDB input.", topology.len());
        Ok((topology, state))
    }
}

/// Parses the PDB formal charge column (`2+`, `1-`). Blank or malformed
/// values read as zero.
fn parse_formal_charge(value: &str) -> f64 {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(d), Some(sign)) if d.is_ascii_digit() => {
            let magnitude = f64::from(d.to_digit(10).unwrap_or(0));
            match sign {
                '-' => -magnitude,
                '+' => magnitude,
                _ => 0.0,
            }
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
HEADER    TEST STRUCTURE
ATOM      1  N   GLY A   1      -1.000   2.000   3.000  1.00  0.00           N
ATOM      2  CA  GLY A   1       0.000   0.000   0.000  1.00  0.00           C
ATOM      3 1HB  ALA A   2       1.500   0.500  -0.250  1.00  0.00
HETATM    4 FE   HEM B 101      10.000  10.000  10.000  1.00  0.00          FE2+
HETATM    5  X1  UNK B 102       5.000   5.000   5.000  1.00  0.00           Q
END
ATOM      6  N   GLY A   3       9.000   9.000   9.000  1.00  0.00           N
";

    fn read(input: &str) -> Result<(Topology, State), LoadError> {
        let mut reader = Cursor::new(input);
        PdbFile::read_from(&mut reader, &MassTable::new())
    }

    #[test]
    fn reads_atoms_until_end_record() {
        let (topology, state) = read(SAMPLE).unwrap();
        assert_eq!(topology.len(), 5);
        assert_eq!(state.len(), 5);

        let atoms = topology.atoms();
        assert_eq!(atoms[0].name, "N");
        assert_eq!(atoms[0].resname, "GLY");
        assert_eq!(atoms[0].resid, 1);
        assert_eq!(atoms[0].chain, 'A');
        assert_eq!(state.coords()[0], Point3::new(-1.0, 2.0, 3.0));
        assert_eq!(atoms[3].resid, 101);
        assert_eq!(atoms[3].chain, 'B');
    }

    #[test]
    fn assigns_elements_and_masses() {
        let (topology, _) = read(SAMPLE).unwrap();
        let atoms = topology.atoms();

        assert_eq!(atoms[1].element, "C");
        assert_eq!(atoms[1].mass, Some(12.011));
        // Element column blank: guessed from the name.
        assert_eq!(atoms[2].element, "H");
        assert_eq!(atoms[2].mass, Some(1.008));
        assert_eq!(atoms[3].element, "FE");
        assert_eq!(atoms[3].charge, 2.0);
        // Unknown element keeps an unset mass.
        assert_eq!(atoms[4].element, "Q");
        assert_eq!(atoms[4].mass, None);
    }

    #[test]
    fn stops_at_first_model() {
        let input = "\
MODEL        1
ATOM      1  N   GLY A   1       0.000   0.000   0.000
ENDMDL
MODEL        2
ATOM      1  N   GLY A   1       1.000   1.000   1.000
ENDMDL
";
        let (topology, state) = read(input).unwrap();
        assert_eq!(topology.len(), 1);
        assert_eq!(state.coords()[0], Point3::origin());
    }

    #[test]
    fn rejects_short_atom_lines() {
        let err = read("ATOM      1  N   GLY A   1       0.000\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                line: 1,
                kind: ParseErrorKind::LineTooShort { .. }
            }
        ));
    }

    #[test]
    fn rejects_malformed_coordinates() {
        let err = read("ATOM      1  N   GLY A   1       0.000   abcde   0.000\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                kind: ParseErrorKind::InvalidFloat { .. },
                ..
            }
        ));
    }

    #[test]
    fn rejects_input_without_atoms() {
        let err = read("HEADER    NOTHING HERE\nEND\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingRecord(_)));
    }

    #[test]
    fn formal_charge_parsing() {
        assert_eq!(parse_formal_charge("2+"), 2.0);
        assert_eq!(parse_formal_charge("1-"), -1.0);
        assert_eq!(parse_formal_charge(""), 0.0);
        assert_eq!(parse_formal_charge("+2"), 0.0);
    }

    #[test]
    fn read_from_path_opens_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, SAMPLE.as_bytes()).unwrap();
        let (topology, _) = PdbFile::read_from_path(file.path(), &MassTable::new()).unwrap();
        assert_eq!(topology.len(), 5);
        assert!(matches!(
            PdbFile::read_from_path("/nonexistent/x.pdb", &MassTable::new()),
            Err(LoadError::Io(_))
        ));
    }
}
