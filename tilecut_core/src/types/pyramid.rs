//! Tile pyramids: a grid definition subdivided by zoom level, with optional metatiling.
//!
//! At zoom `z` the grid has `rows * 2^z` by `cols * 2^z` base tiles. Metatiling
//! groups `metatiling x metatiling` base tiles into one tile; metatiles reaching
//! past the pyramid edge are clipped to the pyramid bounds.
//!
//! ```
//! use tilecut_core::{BBox, TilePyramid};
//!
//! let pyramid = TilePyramid::geodetic();
//! assert_eq!(pyramid.matrix_width(1), 4);
//! assert_eq!(pyramid.matrix_height(1), 2);
//!
//! let tile = pyramid.tile(1, 0, 0).unwrap();
//! assert_eq!(tile.bounds().as_tuple(), (-180.0, 0.0, -90.0, 90.0));
//!
//! let bbox = BBox::new(-100.0, -10.0, -80.0, 10.0).unwrap();
//! assert_eq!(pyramid.tiles_from_bounds(&bbox, 1).len(), 4);
//! ```

use crate::{BBox, Crs, GridDefinition, Tile, TileCoord};
use anyhow::{Result, ensure};
use itertools::Itertools;

/// Highest supported zoom level.
pub const MAX_ZOOM: u8 = 30;

/// Snapping tolerance for tile index computations, in tile units.
const INDEX_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePyramid {
	grid: GridDefinition,
	tile_size: u32,
	metatiling: u32,
}

impl TilePyramid {
	/// Creates a pyramid over `grid` with tiles of `tile_size` pixels.
	///
	/// # Errors
	/// Returns an error if `tile_size` is zero or `metatiling` is not one of 1, 2, 4, 8 or 16.
	pub fn new(grid: GridDefinition, tile_size: u32, metatiling: u32) -> Result<TilePyramid> {
		ensure!(tile_size > 0, "tile_size must be greater than 0");
		ensure!(
			[1, 2, 4, 8, 16].contains(&metatiling),
			"metatiling ({metatiling}) must be one of 1, 2, 4, 8 or 16"
		);
		Ok(TilePyramid {
			grid,
			tile_size,
			metatiling,
		})
	}

	/// The geodetic pyramid with 256 pixel tiles and no metatiling.
	#[must_use]
	pub fn geodetic() -> TilePyramid {
		TilePyramid {
			grid: GridDefinition::geodetic(),
			tile_size: 256,
			metatiling: 1,
		}
	}

	/// The mercator pyramid with 256 pixel tiles and no metatiling.
	#[must_use]
	pub fn mercator() -> TilePyramid {
		TilePyramid {
			grid: GridDefinition::mercator(),
			tile_size: 256,
			metatiling: 1,
		}
	}

	#[must_use]
	pub fn grid(&self) -> &GridDefinition {
		&self.grid
	}

	#[must_use]
	pub fn crs(&self) -> Crs {
		self.grid.crs
	}

	#[must_use]
	pub fn bounds(&self) -> BBox {
		self.grid.bounds
	}

	#[must_use]
	pub fn is_global(&self) -> bool {
		self.grid.is_global
	}

	#[must_use]
	pub fn tile_size(&self) -> u32 {
		self.tile_size
	}

	#[must_use]
	pub fn metatiling(&self) -> u32 {
		self.metatiling
	}

	fn base_cols(&self, zoom: u8) -> f64 {
		f64::from(self.grid.cols) * f64::from(1u32 << zoom)
	}

	fn base_rows(&self, zoom: u8) -> f64 {
		f64::from(self.grid.rows) * f64::from(1u32 << zoom)
	}

	/// Number of tile columns at `zoom`.
	#[must_use]
	pub fn matrix_width(&self, zoom: u8) -> u32 {
		(self.base_cols(zoom) / f64::from(self.metatiling)).ceil() as u32
	}

	/// Number of tile rows at `zoom`.
	#[must_use]
	pub fn matrix_height(&self, zoom: u8) -> u32 {
		(self.base_rows(zoom) / f64::from(self.metatiling)).ceil() as u32
	}

	/// Unclipped tile width in CRS units.
	#[must_use]
	pub fn tile_x_size(&self, zoom: u8) -> f64 {
		self.grid.bounds.width() / self.base_cols(zoom) * f64::from(self.metatiling)
	}

	/// Unclipped tile height in CRS units.
	#[must_use]
	pub fn tile_y_size(&self, zoom: u8) -> f64 {
		self.grid.bounds.height() / self.base_rows(zoom) * f64::from(self.metatiling)
	}

	/// Pixel width in CRS units. Independent of metatiling.
	#[must_use]
	pub fn pixel_x_size(&self, zoom: u8) -> f64 {
		self.grid.bounds.width() / (self.base_cols(zoom) * f64::from(self.tile_size))
	}

	/// Pixel height in CRS units. Independent of metatiling.
	#[must_use]
	pub fn pixel_y_size(&self, zoom: u8) -> f64 {
		self.grid.bounds.height() / (self.base_rows(zoom) * f64::from(self.tile_size))
	}

	/// Returns the tile at `(zoom, row, col)` without pixelbuffer.
	pub fn tile(&self, zoom: u8, row: u32, col: u32) -> Result<Tile> {
		Tile::new(*self, TileCoord::new(zoom, row, col), 0)
	}

	/// Returns the extent of a tile, clipped to the pyramid bounds.
	#[must_use]
	pub fn tile_bounds(&self, coord: &TileCoord) -> BBox {
		let bounds = self.grid.bounds;
		let tile_x_size = self.tile_x_size(coord.zoom);
		let tile_y_size = self.tile_y_size(coord.zoom);
		let left = bounds.left + f64::from(coord.col) * tile_x_size;
		let top = bounds.top - f64::from(coord.row) * tile_y_size;
		BBox {
			left,
			bottom: (top - tile_y_size).max(bounds.bottom),
			right: (left + tile_x_size).min(bounds.right),
			top,
		}
	}

	/// Splits `bbox` into parts that lie inside the pyramid bounds.
	///
	/// The first entry is the part of `bbox` inside the pyramid. For global
	/// pyramids, the parts reaching past the left or right edge are shifted by one
	/// pyramid width and appended (left overflow first). Parts beyond the top or
	/// bottom edge are discarded. Parts without area are omitted, so the result
	/// can be empty.
	#[must_use]
	pub fn clip_bounds(&self, bbox: &BBox) -> Vec<BBox> {
		let bounds = self.grid.bounds;
		let mut parts = Vec::new();

		if let Some(inner) = bbox.intersection(&bounds) {
			parts.push(inner);
		}

		if self.grid.is_global {
			let width = bounds.width();
			if bbox.left < bounds.left {
				let overflow = BBox {
					right: bbox.right.min(bounds.left),
					..*bbox
				};
				if let Some(part) = overflow.translated(width, 0.0).intersection(&bounds) {
					parts.push(part);
				}
			}
			if bbox.right > bounds.right {
				let overflow = BBox {
					left: bbox.left.max(bounds.right),
					..*bbox
				};
				if let Some(part) = overflow.translated(-width, 0.0).intersection(&bounds) {
					parts.push(part);
				}
			}
		}

		parts
	}

	/// Returns all tiles at `zoom` that share an area with `bbox`, sorted by row and column.
	///
	/// Tiles that only touch `bbox` along an edge are not included. For global
	/// pyramids, parts of `bbox` beyond the left or right edge select tiles from
	/// the opposite side of the pyramid.
	#[must_use]
	pub fn tiles_from_bounds(&self, bbox: &BBox, zoom: u8) -> Vec<Tile> {
		let bounds = self.grid.bounds;
		let tile_x_size = self.tile_x_size(zoom);
		let tile_y_size = self.tile_y_size(zoom);
		let width = f64::from(self.matrix_width(zoom));
		let height = f64::from(self.matrix_height(zoom));

		let coords = self
			.clip_bounds(bbox)
			.into_iter()
			.flat_map(|part| {
				let col_min = snap((part.left - bounds.left) / tile_x_size).floor().max(0.0) as u32;
				let col_max = snap((part.right - bounds.left) / tile_x_size).ceil().min(width) as u32;
				let row_min = snap((bounds.top - part.top) / tile_y_size).floor().max(0.0) as u32;
				let row_max = snap((bounds.top - part.bottom) / tile_y_size).ceil().min(height) as u32;
				log::trace!("{part:?} covers rows {row_min}..{row_max}, cols {col_min}..{col_max} at zoom {zoom}");
				(row_min..row_max).flat_map(move |row| (col_min..col_max).map(move |col| TileCoord::new(zoom, row, col)))
			})
			.sorted()
			.dedup();

		coords.map(|coord| Tile::from_parts(*self, coord, 0)).collect()
	}
}

/// Rounds values that are within floating point noise of an integer.
fn snap(value: f64) -> f64 {
	let rounded = value.round();
	if (value - rounded).abs() < INDEX_EPSILON {
		rounded
	} else {
		value
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use rstest::rstest;

	fn tuples(tiles: &[Tile]) -> Vec<(u8, u32, u32)> {
		tiles.iter().map(|t| t.coord().as_tuple()).collect()
	}

	#[rstest]
	#[case(0, 1, 1, 2)]
	#[case(0, 2, 1, 1)]
	#[case(2, 1, 4, 8)]
	#[case(2, 4, 1, 2)]
	#[case(3, 16, 1, 1)]
	fn geodetic_matrix(#[case] zoom: u8, #[case] metatiling: u32, #[case] height: u32, #[case] width: u32) {
		let pyramid = TilePyramid::new(GridDefinition::geodetic(), 256, metatiling).unwrap();
		assert_eq!(pyramid.matrix_height(zoom), height);
		assert_eq!(pyramid.matrix_width(zoom), width);
	}

	#[test]
	fn rejects_invalid_parameters() {
		assert!(TilePyramid::new(GridDefinition::geodetic(), 0, 1).is_err());
		assert!(TilePyramid::new(GridDefinition::geodetic(), 256, 3).is_err());
		assert!(TilePyramid::new(GridDefinition::geodetic(), 256, 32).is_err());
	}

	#[test]
	fn pixel_sizes() {
		let pyramid = TilePyramid::geodetic();
		assert_relative_eq!(pyramid.pixel_x_size(1), 0.3515625);
		assert_relative_eq!(pyramid.pixel_y_size(1), 0.3515625);
		assert_relative_eq!(pyramid.tile_x_size(1), 90.0);

		let pyramid = TilePyramid::mercator();
		assert_relative_eq!(pyramid.pixel_x_size(0), 156_543.033_928_040_6, epsilon = 1e-6);

		let meta = TilePyramid::new(GridDefinition::geodetic(), 256, 4).unwrap();
		assert_relative_eq!(meta.pixel_x_size(1), 0.3515625);
		assert_relative_eq!(meta.tile_x_size(1), 360.0);
	}

	#[test]
	fn metatiles_are_clipped_to_pyramid() {
		let pyramid = TilePyramid::new(GridDefinition::geodetic(), 256, 2).unwrap();
		let tile = pyramid.tile(0, 0, 0).unwrap();
		assert_eq!(tile.bounds().as_tuple(), (-180.0, -90.0, 180.0, 90.0));
	}

	#[test]
	fn clip_bounds_inside() {
		let pyramid = TilePyramid::geodetic();
		let bbox = BBox::new(-10.0, -10.0, 10.0, 10.0).unwrap();
		assert_eq!(pyramid.clip_bounds(&bbox), vec![bbox]);
	}

	#[test]
	fn clip_bounds_wraps_global_pyramids() {
		let pyramid = TilePyramid::geodetic();
		let bbox = BBox::new(-185.0, 80.0, -170.0, 95.0).unwrap();
		assert_eq!(
			pyramid.clip_bounds(&bbox),
			vec![
				BBox::new(-180.0, 80.0, -170.0, 90.0).unwrap(),
				BBox::new(175.0, 80.0, 180.0, 90.0).unwrap(),
			]
		);

		let bbox = BBox::new(170.0, 0.0, 190.0, 10.0).unwrap();
		assert_eq!(
			pyramid.clip_bounds(&bbox),
			vec![
				BBox::new(170.0, 0.0, 180.0, 10.0).unwrap(),
				BBox::new(-180.0, 0.0, -170.0, 10.0).unwrap(),
			]
		);
	}

	#[test]
	fn clip_bounds_does_not_wrap_regional_pyramids() {
		let grid = GridDefinition::new(Crs::WGS84, BBox::new(0.0, 0.0, 20.0, 10.0).unwrap(), 1, 2, false).unwrap();
		let pyramid = TilePyramid::new(grid, 256, 1).unwrap();
		let bbox = BBox::new(-5.0, 2.0, 5.0, 4.0).unwrap();
		assert_eq!(pyramid.clip_bounds(&bbox), vec![BBox::new(0.0, 2.0, 5.0, 4.0).unwrap()]);
	}

	#[test]
	fn tiles_from_bounds_excludes_touching_tiles() {
		let pyramid = TilePyramid::geodetic();
		let bbox = BBox::new(-90.0, 0.0, 0.0, 90.0).unwrap();
		assert_eq!(tuples(&pyramid.tiles_from_bounds(&bbox, 1)), vec![(1, 0, 1)]);
	}

	#[test]
	fn tiles_from_bounds_wraps_antimeridian() {
		let pyramid = TilePyramid::geodetic();
		let bbox = BBox::new(-181.0, 1.0, -179.0, 2.0).unwrap();
		assert_eq!(tuples(&pyramid.tiles_from_bounds(&bbox, 1)), vec![(1, 0, 0), (1, 0, 3)]);
	}

	#[test]
	fn tiles_from_bounds_is_sorted_and_unique() {
		let pyramid = TilePyramid::geodetic();
		let bbox = BBox::new(-200.0, -100.0, 200.0, 100.0).unwrap();
		let tiles = pyramid.tiles_from_bounds(&bbox, 1);
		assert_eq!(
			tuples(&tiles),
			vec![
				(1, 0, 0),
				(1, 0, 1),
				(1, 0, 2),
				(1, 0, 3),
				(1, 1, 0),
				(1, 1, 1),
				(1, 1, 2),
				(1, 1, 3)
			]
		);
	}

	#[test]
	fn tiles_from_bounds_outside_is_empty() {
		let grid = GridDefinition::new(Crs::WGS84, BBox::new(0.0, 0.0, 20.0, 10.0).unwrap(), 1, 2, false).unwrap();
		let pyramid = TilePyramid::new(grid, 256, 1).unwrap();
		let bbox = BBox::new(30.0, 0.0, 40.0, 10.0).unwrap();
		assert!(pyramid.tiles_from_bounds(&bbox, 0).is_empty());
	}
}
