//! Composite tiles: destination tiles whose content is read from a single vector
//! file or from the tiles of a previously written tile directory.

mod file_tile;
mod process_tile;
mod source;
mod tile_directory;

pub use file_tile::*;
pub use process_tile::*;
pub use source::*;
pub use tile_directory::*;
