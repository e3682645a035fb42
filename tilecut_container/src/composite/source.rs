use crate::FeatureStream;
use anyhow::Result;
use tilecut_core::Tile;

/// The features of one destination tile, read from some underlying source.
pub trait VectorTileSource {
	/// The destination tile, including its pixelbuffer.
	fn tile(&self) -> &Tile;

	/// Whether the source has nothing for the tile.
	///
	/// This answers from existence checks and envelopes where possible and does
	/// not materialize the features.
	fn is_empty(&self) -> Result<bool>;

	/// Reads the features of the tile window, reprojected to the tile CRS.
	fn read(&self) -> Result<FeatureStream>;
}
