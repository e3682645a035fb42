//! The tagged [`Geometry`] variant, its type tags, and the geometry engine
//! operations built on the `geo` crate.

mod engine;
mod geometry_type;
#[allow(clippy::module_inception)]
mod geometry;

pub use geometry::*;
pub use geometry_type::*;
