//! Contains the value types of a tile pyramid: coordinate reference systems, bounding boxes,
//! grid definitions, pyramids, tiles and the error taxonomy shared by all tilecut crates.

mod error;
pub use error::*;

pub mod types;
pub use types::*;
