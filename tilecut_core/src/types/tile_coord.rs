//! Three-dimensional tile addresses `(zoom, row, col)`.
//!
//! Rows count downwards from the top of the pyramid, columns count rightwards
//! from its left edge.
//!
//! ```
//! use tilecut_core::TileCoord;
//!
//! let coord = TileCoord::new(5, 6, 7);
//! assert_eq!(coord.to_string(), "(5, 6, 7)");
//! assert!(coord < TileCoord::new(5, 7, 0));
//! ```

use std::fmt::{self, Debug, Display};

/// Address of a tile inside a pyramid. Orders by zoom, then row, then column.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TileCoord {
	pub zoom: u8,
	pub row: u32,
	pub col: u32,
}

impl TileCoord {
	#[must_use]
	pub fn new(zoom: u8, row: u32, col: u32) -> TileCoord {
		TileCoord { zoom, row, col }
	}

	#[must_use]
	pub fn as_tuple(&self) -> (u8, u32, u32) {
		(self.zoom, self.row, self.col)
	}
}

impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}, {})", self.zoom, self.row, self.col)
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, {}, {})", self.zoom, self.row, self.col)
	}
}

impl From<(u8, u32, u32)> for TileCoord {
	fn from((zoom, row, col): (u8, u32, u32)) -> Self {
		TileCoord { zoom, row, col }
	}
}
