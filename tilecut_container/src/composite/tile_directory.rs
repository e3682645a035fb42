use crate::{VectorDriver, VectorSchema, WriteReport, write_vector_window};
use anyhow::{Context, Result, ensure};
use std::{
	fs,
	path::{Path, PathBuf},
};
use tilecut_core::{Tile, TileCoord, TilePyramid};
use tilecut_geometry::GeoFeature;

/// Output store of a process: one vector file per tile, laid out as
/// `<root>/<zoom>/<row>/<col>.<extension>`.
#[derive(Clone, Debug, PartialEq)]
pub struct TileDirectory {
	root: PathBuf,
	pyramid: TilePyramid,
	schema: VectorSchema,
	driver: VectorDriver,
	pixelbuffer: u32,
}

impl TileDirectory {
	pub fn new(root: impl Into<PathBuf>, pyramid: TilePyramid, schema: VectorSchema, driver: VectorDriver) -> Self {
		Self {
			root: root.into(),
			pyramid,
			schema,
			driver,
			pixelbuffer: 0,
		}
	}

	/// Sets the pixelbuffer of the tiles returned by [`tile`](Self::tile).
	#[must_use]
	pub fn with_pixelbuffer(mut self, pixelbuffer: u32) -> Self {
		self.pixelbuffer = pixelbuffer;
		self
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn pyramid(&self) -> &TilePyramid {
		&self.pyramid
	}

	pub fn schema(&self) -> &VectorSchema {
		&self.schema
	}

	pub fn driver(&self) -> VectorDriver {
		self.driver
	}

	pub fn pixelbuffer(&self) -> u32 {
		self.pixelbuffer
	}

	/// The output tile at `(zoom, row, col)`.
	pub fn tile(&self, zoom: u8, row: u32, col: u32) -> Result<Tile> {
		Tile::new(self.pyramid, TileCoord::new(zoom, row, col), self.pixelbuffer)
	}

	pub fn tile_path(&self, coord: &TileCoord) -> PathBuf {
		self.root
			.join(coord.zoom.to_string())
			.join(coord.row.to_string())
			.join(format!("{}.{}", coord.col, self.driver.extension()))
	}

	pub fn tile_exists(&self, coord: &TileCoord) -> bool {
		self.tile_path(coord).is_file()
	}

	/// Writes `features` clipped to `tile`. Tiles without features are removed.
	pub fn write_tile(&self, tile: &Tile, features: impl IntoIterator<Item = GeoFeature>) -> Result<WriteReport> {
		ensure!(
			tile.pyramid() == &self.pyramid,
			"{tile} does not belong to the pyramid of {:?}",
			self.root
		);
		let path = self.tile_path(&tile.coord());
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).with_context(|| format!("creating directory {parent:?}"))?;
		}
		write_vector_window(&path, tile, features, &self.schema, self.driver)
	}
}
