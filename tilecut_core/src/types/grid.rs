use crate::{BBox, Crs};
use anyhow::{Result, bail, ensure};

const MERCATOR_EXTENT: f64 = 20_037_508.342_789_2;

/// The zoom-0 layout of a tile pyramid: CRS, global extent and number of rows and columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDefinition {
	pub crs: Crs,
	pub bounds: BBox,
	pub rows: u32,
	pub cols: u32,
	/// Whether the grid spans the whole globe horizontally, so that its left and right edges meet.
	pub is_global: bool,
}

impl GridDefinition {
	/// Creates a custom grid.
	///
	/// # Errors
	/// Returns an error if the shape is empty or its cells are not square.
	pub fn new(crs: Crs, bounds: BBox, rows: u32, cols: u32, is_global: bool) -> Result<GridDefinition> {
		ensure!(rows > 0 && cols > 0, "grid shape ({rows} x {cols}) must not be empty");
		ensure!(
			bounds.width() > 0.0 && bounds.height() > 0.0,
			"grid bounds {bounds:?} must have a positive area"
		);
		let cell_width = bounds.width() / f64::from(cols);
		let cell_height = bounds.height() / f64::from(rows);
		ensure!(
			((cell_width - cell_height) / cell_width).abs() < 1e-9,
			"grid cells must be square, got {cell_width} x {cell_height}"
		);
		Ok(GridDefinition {
			crs,
			bounds,
			rows,
			cols,
			is_global,
		})
	}

	/// EPSG:4326 covering the globe with two zoom-0 tiles side by side.
	#[must_use]
	pub fn geodetic() -> GridDefinition {
		GridDefinition {
			crs: Crs::WGS84,
			bounds: BBox {
				left: -180.0,
				bottom: -90.0,
				right: 180.0,
				top: 90.0,
			},
			rows: 1,
			cols: 2,
			is_global: true,
		}
	}

	/// EPSG:3857 covering the globe with a single zoom-0 tile.
	#[must_use]
	pub fn mercator() -> GridDefinition {
		GridDefinition {
			crs: Crs::WEB_MERCATOR,
			bounds: BBox {
				left: -MERCATOR_EXTENT,
				bottom: -MERCATOR_EXTENT,
				right: MERCATOR_EXTENT,
				top: MERCATOR_EXTENT,
			},
			rows: 1,
			cols: 1,
			is_global: true,
		}
	}

	/// Looks up a built-in grid by name.
	pub fn from_name(name: &str) -> Result<GridDefinition> {
		Ok(match name.trim().to_ascii_lowercase().as_str() {
			"geodetic" => GridDefinition::geodetic(),
			"mercator" => GridDefinition::mercator(),
			_ => bail!("unknown grid '{name}', expected 'geodetic' or 'mercator'"),
		})
	}
}
