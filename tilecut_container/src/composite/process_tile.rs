use super::{TileDirectory, VectorTileSource};
use crate::{FeatureStream, read_vector_window};
use anyhow::{Result, ensure};
use tilecut_core::Tile;

/// A destination tile read from the output tiles of another process.
///
/// With a pixelbuffer, or when the output uses a different metatiling, one
/// destination tile can depend on several output tiles. Which tiles these are,
/// and whether any of them exist, can be answered without reading them.
#[derive(Clone, Debug)]
pub struct VectorProcessTile {
	output: TileDirectory,
	tile: Tile,
	check_validity: bool,
}

impl VectorProcessTile {
	/// # Errors
	/// Fails if `tile` and the output pyramid use different CRSs.
	pub fn new(output: TileDirectory, tile: Tile) -> Result<VectorProcessTile> {
		ensure!(
			tile.crs() == output.pyramid().crs(),
			"{tile} is in {}, but the output in {:?} is in {}",
			tile.crs(),
			output.root(),
			output.pyramid().crs()
		);
		Ok(VectorProcessTile {
			output,
			tile,
			check_validity: true,
		})
	}

	#[must_use]
	pub fn with_check_validity(mut self, check_validity: bool) -> Self {
		self.check_validity = check_validity;
		self
	}

	pub fn output(&self) -> &TileDirectory {
		&self.output
	}

	/// The output tiles at the destination zoom that share an area with the
	/// buffered destination tile, whether they were written or not.
	pub fn covering_tiles(&self) -> Vec<Tile> {
		self.output
			.pyramid()
			.tiles_from_bounds(&self.tile.buffered_bounds(), self.tile.zoom())
	}

	/// Reads only the output tile with the coordinates of the destination tile.
	///
	/// This is only correct if both pyramids use the same metatiling.
	pub fn read_no_neighbors(&self) -> Result<FeatureStream> {
		let path = self.output.tile_path(&self.tile.coord());
		if path.is_file() {
			read_vector_window(&path, &self.tile, self.check_validity)
		} else {
			Ok(FeatureStream::empty(self.tile.crs()))
		}
	}
}

impl VectorTileSource for VectorProcessTile {
	fn tile(&self) -> &Tile {
		&self.tile
	}

	fn is_empty(&self) -> Result<bool> {
		Ok(!self
			.covering_tiles()
			.iter()
			.any(|t| self.output.tile_exists(&t.coord())))
	}

	/// Concatenates the reads of all existing covering tiles, in row and column order.
	fn read(&self) -> Result<FeatureStream> {
		let mut stream = FeatureStream::empty(self.tile.crs());
		for covering in self.covering_tiles() {
			let path = self.output.tile_path(&covering.coord());
			if !path.is_file() {
				continue;
			}
			log::trace!("{} reads {covering} from {path:?}", self.tile);
			stream.append(read_vector_window(&path, &self.tile, self.check_validity)?);
		}
		Ok(stream)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{VectorDriver, VectorSchema};
	use pretty_assertions::assert_eq;
	use tempfile::TempDir;
	use tilecut_core::{TileCoord, TilePyramid};
	use tilecut_geometry::{GeoFeature, Geometry, GeometryType};

	fn output(dir: &TempDir, pyramid: TilePyramid) -> TileDirectory {
		TileDirectory::new(
			dir.path(),
			pyramid,
			VectorSchema::new(GeometryType::Point),
			VectorDriver::GeoJson,
		)
	}

	fn coords(tiles: &[Tile]) -> Vec<(u8, u32, u32)> {
		tiles.iter().map(|t| t.coord().as_tuple()).collect()
	}

	fn point(x: f64, y: f64) -> GeoFeature {
		GeoFeature::new(Geometry::new_point([x, y]))
	}

	#[test]
	fn covering_tiles_without_buffer() {
		let dir = TempDir::new().unwrap();
		let tile = TilePyramid::geodetic().tile(3, 2, 5).unwrap();
		let source = VectorProcessTile::new(output(&dir, TilePyramid::geodetic()), tile).unwrap();
		assert_eq!(coords(&source.covering_tiles()), vec![(3, 2, 5)]);
	}

	#[test]
	fn covering_tiles_with_buffer() {
		let dir = TempDir::new().unwrap();
		let tile = TilePyramid::geodetic().tile(3, 2, 5).unwrap().with_pixelbuffer(1);
		let source = VectorProcessTile::new(output(&dir, TilePyramid::geodetic()), tile).unwrap();
		assert_eq!(
			coords(&source.covering_tiles()),
			vec![
				(3, 1, 4),
				(3, 1, 5),
				(3, 1, 6),
				(3, 2, 4),
				(3, 2, 5),
				(3, 2, 6),
				(3, 3, 4),
				(3, 3, 5),
				(3, 3, 6)
			]
		);
	}

	#[test]
	fn covering_metatiles() {
		let dir = TempDir::new().unwrap();
		let metatiled = TilePyramid::new(*TilePyramid::geodetic().grid(), 256, 2).unwrap();
		let tile = TilePyramid::geodetic().tile(3, 2, 5).unwrap();
		let source = VectorProcessTile::new(output(&dir, metatiled), tile).unwrap();
		assert_eq!(coords(&source.covering_tiles()), vec![(3, 1, 2)]);
	}

	#[test]
	fn crs_must_match() {
		let dir = TempDir::new().unwrap();
		let tile = TilePyramid::mercator().tile(1, 0, 0).unwrap();
		assert!(VectorProcessTile::new(output(&dir, TilePyramid::geodetic()), tile).is_err());
	}

	#[test]
	fn emptiness_follows_existing_tiles() {
		let dir = TempDir::new().unwrap();
		let output = output(&dir, TilePyramid::geodetic());
		let tile = TilePyramid::geodetic().tile(3, 2, 5).unwrap().with_pixelbuffer(1);
		let source = VectorProcessTile::new(output.clone(), tile).unwrap();
		assert!(source.is_empty().unwrap());
		assert_eq!(source.read().unwrap().count(), 0);

		// (3, 2, 5) covers (-67.5, 22.5, -45, 45), its neighbour (3, 2, 6) covers (-45, 22.5, -22.5, 45)
		let neighbour = output.tile(3, 2, 6).unwrap();
		output.write_tile(&neighbour, vec![point(-44.95, 30.0), point(-30.0, 30.0)]).unwrap();
		assert!(!source.is_empty().unwrap());

		// only the point inside the buffer of the destination tile is read
		let features: Vec<_> = source.read().unwrap().collect();
		assert_eq!(features.len(), 1);
		assert_eq!(features[0].geometry, Geometry::new_point([-44.95, 30.0]));

		assert_eq!(source.read_no_neighbors().unwrap().count(), 0);
	}

	#[test]
	fn reads_are_concatenated_in_tile_order() {
		let dir = TempDir::new().unwrap();
		let output = output(&dir, TilePyramid::geodetic());
		let tile = TilePyramid::geodetic().tile(3, 2, 5).unwrap().with_pixelbuffer(1);

		output
			.write_tile(&output.tile(3, 2, 5).unwrap(), vec![point(-50.0, 30.0)])
			.unwrap();
		output
			.write_tile(&output.tile(3, 1, 4).unwrap(), vec![point(-67.55, 45.05)])
			.unwrap();

		let source = VectorProcessTile::new(output.clone(), tile).unwrap();
		let features: Vec<_> = source.read().unwrap().collect();
		assert_eq!(
			features.iter().map(|f| f.geometry.clone()).collect::<Vec<_>>(),
			vec![Geometry::new_point([-67.55, 45.05]), Geometry::new_point([-50.0, 30.0])]
		);

		let features: Vec<_> = source.read_no_neighbors().unwrap().collect();
		assert_eq!(features.len(), 1);
		assert!(output.tile_exists(&TileCoord::new(3, 2, 5)));
	}
}
