//! Geometry model and geometry-level operations of the tile pipeline: validity and
//! repair, clipping, type normalization, reprojection and GeoJSON encoding.

pub mod feature;
pub mod geojson;
pub mod geometry;
pub mod normalize;
pub mod reproject;

pub use feature::*;
pub use geojson::*;
pub use geometry::*;
pub use normalize::*;
pub use reproject::*;
