//! # Molar Core Library
//!
//! A library for loading molecular structures, selecting atoms with a small
//! query language, and reading or editing their coordinates through live,
//! aliased views.
//!
//! ## Architectural Philosophy
//!
//! The library is layered so that storage, the query compiler and the
//! user-facing handles can be tested in isolation.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Atom`, `Topology`,
//!   `State`), the column-aligned `AtomStore`, the attribute registry, element
//!   masses and the PDB/BGF readers.
//!
//! - **[`select`]: The Query Compiler.** Lexer, recursive descent parser and
//!   evaluator that turn a query such as `"resid 5:6 and name CA"` into an
//!   ordered list of atom indices.
//!
//! - **[`source`]: The Public API.** `Source` owns a store; `Sel`, `PosView`
//!   and `Particle` alias it, so a write through any of them is visible
//!   through all of them.
//!
//! ```ignore
//! use molar::Source;
//!
//! let source = Source::from_file("protein.pdb")?;
//! let sel = source.select_str("resid 5:6")?;
//! sel.nth(0)?.set_coord(0, 42.0)?;
//! println!("{}", source.select_all().com()?);
//! ```

pub mod core;
pub mod select;
pub mod source;

pub use source::{MolarError, Particle, PosView, Sel, Source};
