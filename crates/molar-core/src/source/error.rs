use thiserror::Error;

use crate::core::io::LoadError;
use crate::core::models::store::StoreError;
use crate::select::SelectionError;

#[derive(Debug, Error)]
pub enum MolarError {
    #[error("Failed to load structure: {source}")]
    Load {
        #[from]
        source: LoadError,
    },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("Inconsistent structure: {0}")]
    Inconsistent(String),

    #[error("Selection is empty")]
    EmptySelection,

    #[error("Total mass of the selection is zero")]
    ZeroTotalMass,

    #[error("The source owning this selection has been released")]
    UseAfterRelease,
}

impl From<StoreError> for MolarError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::IndexOutOfRange { index, len } => MolarError::IndexOutOfRange { index, len },
            StoreError::UnknownAttribute(name) => MolarError::UnknownAttribute(name),
            StoreError::LengthMismatch { .. } => MolarError::Inconsistent(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_onto_matching_variants() {
        assert!(matches!(
            MolarError::from(StoreError::IndexOutOfRange { index: 4, len: 2 }),
            MolarError::IndexOutOfRange { index: 4, len: 2 }
        ));
        assert!(matches!(
            MolarError::from(StoreError::UnknownAttribute("bfactor".into())),
            MolarError::UnknownAttribute(name) if name == "bfactor"
        ));
        let err = MolarError::from(StoreError::LengthMismatch {
            topology: 3,
            state: 2,
        });
        assert_eq!(
            err.to_string(),
            "Inconsistent structure: Topology has 3 atoms but state has 2 coordinates"
        );
    }
}
