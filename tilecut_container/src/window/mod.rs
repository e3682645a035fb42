//! Tile-windowed reads and writes.
//!
//! A read splits the window of a tile at the pyramid edges, filters each box
//! out of a dataset and hands the features to the caller one by one. A write
//! clips features to a tile and persists the survivors.

mod diagnostics;
mod read;
mod split;
mod write;

pub use diagnostics::*;
pub use read::*;
pub use split::*;
pub use write::*;
