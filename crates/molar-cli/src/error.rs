use molar::MolarError;
use molar::core::io::LoadError;
use molar::core::masses::MassTableError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Molar(#[from] MolarError),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("Invalid mass table: {0}")]
    MassTable(#[from] MassTableError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to format output: {0}")]
    Format(#[from] std::fmt::Error),
}
