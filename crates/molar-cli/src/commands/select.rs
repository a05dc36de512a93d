use super::{format_point, load_structure};
use crate::cli::SelectArgs;
use crate::error::Result;
use molar::core::masses::MassTable;
use molar::{Sel, Source};
use std::fmt::Write as _;
use tracing::{info, warn};

pub fn run(args: SelectArgs, masses: MassTable) -> Result<()> {
    let (topology, state) = load_structure(&args.file, masses)?;
    let source = Source::new(topology, state)?;

    info!("Evaluating query {:?} over {} atoms.", args.query, source.len());
    let sel = source.select_str(&args.query)?;
    if sel.is_empty() {
        warn!("Query {:?} matched no atoms.", args.query);
    }

    print!("{}", render(&sel, args.atoms)?);
    Ok(())
}

/// Formats the match count, the center of mass and optionally one line per atom.
fn render(sel: &Sel, with_atoms: bool) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Selected atoms: {}", sel.len())?;
    match sel.com() {
        Ok(com) => writeln!(out, "Center of mass: {}", format_point(&com))?,
        Err(e) => writeln!(out, "Center of mass: n/a ({})", e)?,
    }

    if with_atoms {
        for particle in sel.iter() {
            let pos = particle.pos().get()?;
            writeln!(
                out,
                "{:>6} {:<4} {:<4} {:>5} {}",
                particle.index(),
                particle.name()?,
                particle.resname()?,
                particle.resid()?,
                format_point(&pos)
            )?;
        }
    }
    Ok(out)
}
