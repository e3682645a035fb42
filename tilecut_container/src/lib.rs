//! Reading and writing vector tiles of a tile pyramid.
//!
//! - [`VectorDataset`] and [`VectorDatasetWriter`] open and create GeoJSON files.
//! - [`read_vector_window`] streams the features of a dataset that fall into a
//!   buffered tile, reprojected into the tile CRS and split at the antimeridian.
//! - [`write_vector_window`] clips features to a tile and writes them to one file.
//! - [`VectorFileTile`] and [`VectorProcessTile`] answer whether a destination tile
//!   has any input, from a single file or from the tiles of another process.
//! - [`VectorOutputConfig`] describes an output directory in YAML.

mod composite;
pub use composite::*;

mod config;
pub use config::*;

mod dataset;
pub use dataset::*;

mod window;
pub use window::*;
