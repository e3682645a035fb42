use super::VectorTileSource;
use crate::{FeatureStream, read_vector_window};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tilecut_core::{Tile, TileError};

/// A destination tile read from one vector file.
#[derive(Clone, Debug)]
pub struct VectorFileTile {
	path: PathBuf,
	tile: Tile,
	check_validity: bool,
}

impl VectorFileTile {
	/// # Errors
	/// Fails with [`TileError::SourceUnavailable`] if `path` is not a file.
	pub fn new(path: impl Into<PathBuf>, tile: Tile) -> Result<VectorFileTile, TileError> {
		let path = path.into();
		if !path.is_file() {
			return Err(TileError::SourceUnavailable {
				path,
				reason: "input file does not exist".into(),
			});
		}
		Ok(VectorFileTile {
			path,
			tile,
			check_validity: true,
		})
	}

	/// Whether reprojected geometries are checked for validity (default `true`).
	#[must_use]
	pub fn with_check_validity(mut self, check_validity: bool) -> Self {
		self.check_validity = check_validity;
		self
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl VectorTileSource for VectorFileTile {
	fn tile(&self) -> &Tile {
		&self.tile
	}

	/// A tile is empty if no feature envelope intersects one of its read windows.
	/// The windows are compared in the CRS of the file, and no feature geometry
	/// is clipped or reprojected.
	fn is_empty(&self) -> Result<bool> {
		let empty = !self.read()?.has_candidates();
		if empty {
			log::debug!("{:?} has nothing inside {}", self.path, self.tile);
		}
		Ok(empty)
	}

	fn read(&self) -> Result<FeatureStream> {
		read_vector_window(&self.path, &self.tile, self.check_validity)
	}
}
