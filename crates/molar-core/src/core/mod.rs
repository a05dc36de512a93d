//! # Core Module
//!
//! This module provides the storage foundation of the library: the in-memory
//! representation of one structure snapshot and the means to load it.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Atom records, coordinates and the column store
//! - **File Input** ([`io`]) - PDB and BGF readers behind a common trait
//! - **Element Masses** ([`masses`]) - Standard masses with configurable overrides

pub mod io;
pub mod masses;
pub mod models;
