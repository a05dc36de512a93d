//! Provides input functionality for molecular structure file formats.
//!
//! Each reader implements [`traits::StructureFile`] and turns a file into a
//! `(Topology, State)` pair. [`handler::FileHandler`] picks the reader from
//! the file extension.

pub mod bgf;
pub mod error;
pub mod handler;
pub mod pdb;
pub mod traits;
pub(crate) mod util;

pub use error::LoadError;
pub use handler::{FileFormat, FileHandler};
