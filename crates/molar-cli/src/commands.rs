pub mod info;
pub mod select;

use crate::error::{CliError, Result};
use molar::core::io::FileHandler;
use molar::core::masses::MassTable;
use molar::core::models::state::State;
use molar::core::models::topology::Topology;
use nalgebra::Point3;
use std::path::Path;
use tracing::info;

/// Reads a structure file, attaching the path to any parse failure.
pub(crate) fn load_structure(path: &Path, masses: MassTable) -> Result<(Topology, State)> {
    info!("Loading input structure from {:?}", path);
    let parsing_error = |source| CliError::FileParsing {
        path: path.to_path_buf(),
        source,
    };
    FileHandler::open(path)
        .and_then(|handler| handler.with_masses(masses).read())
        .map_err(parsing_error)
}

pub(crate) fn format_point(p: &Point3<f64>) -> String {
    format!("{:.3} {:.3} {:.3}", p.x, p.y, p.z)
}
