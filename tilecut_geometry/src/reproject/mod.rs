//! CRS transforms of geometries, with clipping to the valid bounds of the destination CRS.

#[allow(clippy::module_inception)]
mod reproject;
mod transformer;

pub use reproject::*;
pub use transformer::*;
