//! # Core Models Module
//!
//! This module contains the data structures used to represent one molecular
//! structure snapshot in memory.
//!
//! ## Overview
//!
//! A structure file is read into two index-aligned halves, a [`topology::Topology`]
//! (who each atom is) and a [`state::State`] (where each atom is). Both halves
//! are merged into a single column-oriented [`store::AtomStore`], which is the
//! only place atom data lives once a structure is loaded.
//!
//! ## Key Components
//!
//! - [`atom`] - A single atom record as produced by the loaders
//! - [`topology`] - Ordered atom records of a structure
//! - [`state`] - Coordinates matching a topology
//! - [`store`] - Column storage with bound-checked accessors
//! - [`attribute`] - Registry of the attributes the selection language can query
//!
//! ## Usage
//!
//! ```ignore
//! use molar::core::models::{atom::Atom, state::State, store::AtomStore, topology::Topology};
//! use nalgebra::Point3;
//!
//! let topology = Topology::from_atoms(vec![Atom::new("CA", "ALA", 1)]);
//! let state = State::from_coords(vec![Point3::new(0.0, 0.0, 0.0)]);
//! let store = AtomStore::from_parts(topology, state)?;
//! ```

pub mod atom;
pub mod attribute;
pub mod state;
pub mod store;
pub mod topology;
