use crate::{BBox, Crs, MAX_ZOOM, TileCoord, TilePyramid};
use anyhow::{Result, ensure};
use std::fmt::{self, Debug, Display};

/// One cell of a [`TilePyramid`], optionally grown by a pixelbuffer margin.
///
/// Tiles are immutable descriptors and cheap to copy.
///
/// ```
/// use tilecut_core::TilePyramid;
///
/// let tile = TilePyramid::geodetic().tile(1, 0, 1).unwrap().with_pixelbuffer(2);
/// assert_eq!(tile.bounds().as_tuple(), (-90.0, 0.0, 0.0, 90.0));
/// assert_eq!(
/// 	tile.buffered_bounds().as_tuple(),
/// 	(-90.703125, -0.703125, 0.703125, 90.703125)
/// );
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Tile {
	pyramid: TilePyramid,
	coord: TileCoord,
	pixelbuffer: u32,
}

impl Tile {
	/// Creates a tile and checks that its coordinates lie inside the pyramid matrix.
	pub fn new(pyramid: TilePyramid, coord: TileCoord, pixelbuffer: u32) -> Result<Tile> {
		ensure!(
			coord.zoom <= MAX_ZOOM,
			"zoom ({}) must be <= {MAX_ZOOM}",
			coord.zoom
		);
		let height = pyramid.matrix_height(coord.zoom);
		let width = pyramid.matrix_width(coord.zoom);
		ensure!(
			coord.row < height,
			"row ({}) out of bounds for zoom {} (matrix height {height})",
			coord.row,
			coord.zoom
		);
		ensure!(
			coord.col < width,
			"col ({}) out of bounds for zoom {} (matrix width {width})",
			coord.col,
			coord.zoom
		);
		Ok(Tile::from_parts(pyramid, coord, pixelbuffer))
	}

	pub(crate) fn from_parts(pyramid: TilePyramid, coord: TileCoord, pixelbuffer: u32) -> Tile {
		Tile {
			pyramid,
			coord,
			pixelbuffer,
		}
	}

	/// Returns the same tile with a different pixelbuffer.
	#[must_use]
	pub fn with_pixelbuffer(&self, pixelbuffer: u32) -> Tile {
		Tile { pixelbuffer, ..*self }
	}

	#[must_use]
	pub fn pyramid(&self) -> &TilePyramid {
		&self.pyramid
	}

	#[must_use]
	pub fn coord(&self) -> TileCoord {
		self.coord
	}

	#[must_use]
	pub fn zoom(&self) -> u8 {
		self.coord.zoom
	}

	#[must_use]
	pub fn row(&self) -> u32 {
		self.coord.row
	}

	#[must_use]
	pub fn col(&self) -> u32 {
		self.coord.col
	}

	#[must_use]
	pub fn crs(&self) -> Crs {
		self.pyramid.crs()
	}

	#[must_use]
	pub fn pixelbuffer(&self) -> u32 {
		self.pixelbuffer
	}

	/// Extent of the pyramid cell, ignoring the pixelbuffer.
	#[must_use]
	pub fn bounds(&self) -> BBox {
		self.pyramid.tile_bounds(&self.coord)
	}

	/// Extent grown by the pixelbuffer on every side.
	///
	/// It may reach past the pyramid bounds.
	#[must_use]
	pub fn buffered_bounds(&self) -> BBox {
		let pixelbuffer = f64::from(self.pixelbuffer);
		self.bounds().buffered(
			pixelbuffer * self.pyramid.pixel_x_size(self.coord.zoom),
			pixelbuffer * self.pyramid.pixel_y_size(self.coord.zoom),
		)
	}
}

impl Display for Tile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Tile({}, {}, {})", self.coord.zoom, self.coord.row, self.coord.col)
	}
}

impl Debug for Tile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Tile")
			.field("coord", &self.coord)
			.field("crs", &self.pyramid.crs())
			.field("pixelbuffer", &self.pixelbuffer)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::GridDefinition;

	#[test]
	fn rejects_coordinates_outside_matrix() {
		let pyramid = TilePyramid::geodetic();
		assert!(pyramid.tile(0, 0, 1).is_ok());
		assert!(pyramid.tile(0, 0, 2).is_err());
		assert!(pyramid.tile(0, 1, 0).is_err());
		assert!(pyramid.tile(31, 0, 0).is_err());
	}

	#[test]
	fn buffered_bounds_extend_past_pyramid() {
		let tile = TilePyramid::geodetic().tile(1, 0, 0).unwrap().with_pixelbuffer(2);
		assert_eq!(
			tile.buffered_bounds().as_tuple(),
			(-180.703125, -0.703125, -89.296875, 90.703125)
		);
		assert_eq!(tile.with_pixelbuffer(0).buffered_bounds(), tile.bounds());
	}

	#[test]
	fn metatile_bounds() {
		let pyramid = TilePyramid::new(GridDefinition::geodetic(), 256, 4).unwrap();
		let tile = pyramid.tile(2, 0, 1).unwrap();
		assert_eq!(tile.bounds().as_tuple(), (0.0, -90.0, 180.0, 90.0));
	}

	#[test]
	fn display() {
		let tile = TilePyramid::mercator().tile(3, 2, 1).unwrap();
		assert_eq!(tile.to_string(), "Tile(3, 2, 1)");
		assert_eq!(tile.crs(), Crs::WEB_MERCATOR);
		assert_eq!(tile.coord(), TileCoord::new(3, 2, 1));
	}
}
