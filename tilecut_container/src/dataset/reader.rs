use super::VectorDriver;
use anyhow::{Context, Result};
use std::{
	fs,
	path::{Path, PathBuf},
};
use tilecut_core::{BBox, Crs, TileError};
use tilecut_geometry::{GeoFeature, parse_geojson};

/// A vector dataset opened for reading.
///
/// The features are kept in file order. Collections without a `crs` member are
/// read as EPSG:4326.
#[derive(Debug)]
pub struct VectorDataset {
	path: PathBuf,
	driver: VectorDriver,
	crs: Crs,
	features: Vec<GeoFeature>,
}

impl VectorDataset {
	/// Opens the dataset at `path`.
	///
	/// # Errors
	/// Fails with [`TileError::SourceUnavailable`] if `path` is not a readable file,
	/// and with a parse error if the content is not a feature collection.
	pub fn open(path: &Path) -> Result<VectorDataset> {
		if !path.is_file() {
			return Err(TileError::SourceUnavailable {
				path: path.to_path_buf(),
				reason: "not a file".into(),
			}
			.into());
		}
		let driver = VectorDriver::from_path(path)?;
		let text = fs::read_to_string(path).map_err(|e| TileError::SourceUnavailable {
			path: path.to_path_buf(),
			reason: e.to_string(),
		})?;

		let collection = match driver {
			VectorDriver::GeoJson => parse_geojson(&text).with_context(|| format!("parsing {path:?}"))?,
		};
		let crs = collection.crs.unwrap_or(Crs::WGS84);
		log::debug!("opened {path:?} ({driver}, {crs}, {} features)", collection.features.len());

		Ok(VectorDataset {
			path: path.to_path_buf(),
			driver,
			crs,
			features: collection.features,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn driver(&self) -> VectorDriver {
		self.driver
	}

	/// The native CRS of the dataset.
	pub fn crs(&self) -> Crs {
		self.crs
	}

	pub fn len(&self) -> usize {
		self.features.len()
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	pub fn features(&self) -> &[GeoFeature] {
		&self.features
	}

	/// The envelope of all features, or `None` if there are none.
	pub fn bounds(&self) -> Option<BBox> {
		self.features
			.iter()
			.filter_map(|f| f.geometry.bounds())
			.reduce(|a, b| a.extended(&b))
	}

	/// Indices of the features from `start` on whose envelope intersects `filter`,
	/// in file order.
	pub fn filter<'a>(&'a self, filter: &'a BBox, start: usize) -> impl Iterator<Item = usize> + 'a {
		self.features
			.iter()
			.enumerate()
			.skip(start)
			.filter(move |(_, f)| f.geometry.bounds().is_some_and(|b| b.intersects(filter)))
			.map(|(index, _)| index)
	}
}
