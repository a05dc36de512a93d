use super::error::{LoadError, ParseErrorKind};
use super::traits::StructureFile;
use super::util::{guess_element, parse_float, parse_int, slice_and_trim};
use crate::core::masses::MassTable;
use crate::core::models::atom::Atom;
use crate::core::models::state::State;
use crate::core::models::topology::Topology;
use nalgebra::Point3;
use std::collections::HashSet;
use std::io::BufRead;
use tracing::{debug, instrument, warn};

const MIN_ATOM_LINE_LEN: usize = 80;

/// Reader for the BioGraf (BGF) format.
///
/// Connectivity (`CONECT`/`ORDER`) and header records are skipped; the
/// element of each atom is derived from its force-field type (`C_3` → `C`,
/// `Fe` → `FE`).
pub struct BgfFile;

impl StructureFile for BgfFile {
    #[instrument(skip_all, name = "bgf_reader")]
    fn read_from(
        reader: &mut impl BufRead,
        masses: &MassTable,
    ) -> Result<(Topology, State), LoadError> {
        let mut topology = Topology::new();
        let mut state = State::new();
        let mut seen_serials = HashSet::new();
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

                    let serial_str = slice_and_trim(&line, 7, 12);
                    let name = slice_and_trim(&line, 13, 18);
                    let resname = slice_and_trim(&line, 19, 22);
                    let chain_str = slice_and_trim(&line, 23, 24);
                    let resid_str = slice_and_trim(&line, 25, 30);
                    let x_str = slice_and_trim(&line, 30, 40);
                    let y_str = slice_and_trim(&line, 40, 50);
                    let z_str = slice_and_trim(&line, 50, 60);
                    let ff_type = slice_and_trim(&line, 61, 66);
                    let charge_str = slice_and_trim(&line, 72, 80);

                    if name.is_empty() {
                        return Err(LoadError::Parse {
                            line: line_num,
                            kind: ParseErrorKind::MissingRequiredField {
                                columns: "14-18".into(),
                            },
                        });
                    }
                    let serial: usize = parse_int(serial_str, line_num, "8-12")?;
                    if !seen_serials.insert(serial) {
                        return Err(LoadError::Inconsistency(format!(
                            "Duplicate atom serial: {}",
                            serial
                        )));
                    }

                    let resid: i32 = parse_int(resid_str, line_num, "26-30")?;
                    let x = parse_float(x_str, line_num, "31-40")?;
                    let y = parse_float(y_str, line_num, "41-50")?;
                    let z = parse_float(z_str, line_num, "51-60")?;
                    if ff_type.is_empty() {
                        return Err(LoadError::Parse {
                            line: line_num,
                            kind: ParseErrorKind::MissingRequiredField {
                                columns: "62-66".into(),
                            },
                        });
                    }
                    let charge = parse_float(charge_str, line_num, "73-80")?;
                    let chain = chain_str.chars().next().unwrap_or('A');

                    let element = guess_element(ff_type, true, masses);
                    let mass = masses.mass_of(&element);
                    if mass.is_none() {
                        unknown_elements += 1;
                    }

                    let mut atom = Atom::new(name, resname, resid)
                        .with_chain(chain)
                        .with_element(&element)
                        .with_charge(charge);
                    atom.mass = mass;

                    topology.push(atom);
                    state.push(Point3::new(x, y, z));
                }
                "END" => break,
                _ => {}
            }
        }

        if seen_serials.is_empty() {
            return Err(LoadError::MissingRecord("ATOM/HETATM records".into()));
        }
        if unknown_elements > 0 {
            warn!(
                "{} atom(s) have an unknown force-field element; their mass is unset.",
                unknown_elements
            );
        }
        debug!("Read {} atoms from BGF input.", topology.len());
        Ok((topology, state))
    }
}
