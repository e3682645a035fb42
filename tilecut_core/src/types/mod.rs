//! Contains types like bounding boxes, CRS identifiers, grids and tiles.

mod bbox;
pub use bbox::*;

mod crs;
pub use crs::*;

mod grid;
pub use grid::*;

mod pyramid;
pub use pyramid::*;

mod tile;
pub use tile::*;

mod tile_coord;
pub use tile_coord::*;
