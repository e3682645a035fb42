use super::GridConfig;
use crate::{TileDirectory, VectorDriver, VectorSchema};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::{Path, PathBuf},
};
use tilecut_core::TilePyramid;

/// Where and how the vector tiles of a process are written.
///
/// ```yaml
/// path: output
/// format: GeoJSON
/// grid: geodetic
/// metatiling: 2
/// pixelbuffer: 4
/// schema:
///   geometry: Polygon
///   properties:
///     name: str
///     height: float
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VectorOutputConfig {
	/// Root directory of the tiles.
	pub path: PathBuf,

	/// Vector driver, currently only `GeoJSON`.
	#[serde(default)]
	pub format: VectorDriver,

	pub schema: VectorSchema,

	/// `geodetic`, `mercator` or a custom grid definition.
	pub grid: GridConfig,

	#[serde(default = "default_tile_size")]
	pub tile_size: u32,

	#[serde(default = "default_metatiling")]
	pub metatiling: u32,

	#[serde(default)]
	pub pixelbuffer: u32,
}

fn default_tile_size() -> u32 {
	256
}

fn default_metatiling() -> u32 {
	1
}

impl VectorOutputConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parses the file at `path`. A relative output path is resolved against the
	/// directory of the file.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config {path:?}"))?;
		let mut config =
			VectorOutputConfig::from_reader(BufReader::new(file)).with_context(|| format!("parsing config {path:?}"))?;
		if config.path.is_relative() {
			if let Some(base) = path.parent() {
				config.path = base.join(&config.path);
			}
		}
		Ok(config)
	}

	pub fn pyramid(&self) -> Result<TilePyramid> {
		TilePyramid::new(self.grid.to_grid()?, self.tile_size, self.metatiling)
	}

	/// Builds the tile directory described by this config.
	pub fn into_tile_directory(self) -> Result<TileDirectory> {
		ensure!(
			self.schema.geometry.multi().is_some(),
			"output schema cannot use {}",
			self.schema.geometry
		);
		let pyramid = self.pyramid()?;
		Ok(TileDirectory::new(self.path, pyramid, self.schema, self.format).with_pixelbuffer(self.pixelbuffer))
	}
}
