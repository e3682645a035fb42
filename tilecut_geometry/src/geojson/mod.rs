//! Reading and writing GeoJSON.
//!
//! Parsing works on `serde_json` values and maps them onto the crate's geometry
//! and feature types. Files may carry a legacy `crs` member naming an EPSG code;
//! collections without one are EPSG:4326.

mod parse;
mod write;

pub use parse::*;
pub use write::*;
