//! Structure ownership and aliased selections.
//!
//! A [`Source`] owns one [`AtomStore`](crate::core::models::store::AtomStore).
//! [`Sel`], [`PosView`] and [`Particle`] hold weak handles to it plus
//! resolved atom indices, and read or write the store on every access. All of
//! them are single-threaded.

pub mod error;
pub mod sel;
#[allow(clippy::module_inception)]
pub mod source;
pub mod view;

pub use error::MolarError;
pub use sel::{DEFAULT_MASS, Particle, Sel};
pub use source::Source;
pub use view::PosView;
