use super::{VectorDriver, VectorSchema};
use anyhow::{Context, Result, ensure};
use serde_json::Value;
use std::{
	fs::{self, File},
	io::{BufWriter, Write},
	path::{Path, PathBuf},
};
use tilecut_core::Crs;
use tilecut_geometry::{GeoFeature, crs_to_json};

/// Streams features into a new vector file.
///
/// The file is removed again if the writer is dropped before [`finish`](Self::finish)
/// succeeded, so an interrupted write never leaves a partial dataset behind.
pub struct VectorDatasetWriter {
	path: PathBuf,
	schema: VectorSchema,
	writer: Option<BufWriter<File>>,
	count: usize,
}

impl VectorDatasetWriter {
	/// Creates the file at `path`, replacing an existing one.
	pub fn create(path: &Path, schema: &VectorSchema, crs: Crs, driver: VectorDriver) -> Result<VectorDatasetWriter> {
		let file = File::create(path).with_context(|| format!("creating {path:?}"))?;
		let mut writer = VectorDatasetWriter {
			path: path.to_path_buf(),
			schema: schema.clone(),
			writer: Some(BufWriter::new(file)),
			count: 0,
		};
		match driver {
			VectorDriver::GeoJson => writer.write_header(crs)?,
		}
		log::debug!("writing {path:?} ({driver}, {crs})");
		Ok(writer)
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn schema(&self) -> &VectorSchema {
		&self.schema
	}

	/// Number of features written so far.
	pub fn count(&self) -> usize {
		self.count
	}

	fn write_header(&mut self, crs: Crs) -> Result<()> {
		let crs = crs_to_json(&crs);
		let writer = self.writer()?;
		write!(writer, "{{\"type\":\"FeatureCollection\",\"crs\":")?;
		serde_json::to_writer(&mut *writer, &crs)?;
		write!(writer, ",\"features\":[")?;
		Ok(())
	}

	/// Appends one feature. Its geometry type must belong to the schema's family.
	pub fn write_feature(&mut self, feature: &GeoFeature) -> Result<()> {
		let geometry_type = feature.geometry.get_type();
		ensure!(
			geometry_type.same_family(&self.schema.geometry),
			"cannot write a {geometry_type} into a {} dataset",
			self.schema.geometry
		);

		let value: Value = feature.to_json();
		let first = self.count == 0;
		let path = self.path.clone();
		let writer = self.writer()?;
		if !first {
			writer.write_all(b",")?;
		}
		serde_json::to_writer(&mut *writer, &value).with_context(|| format!("writing feature to {path:?}"))?;
		self.count += 1;
		Ok(())
	}

	/// Completes the collection and flushes it to disk.
	pub fn finish(mut self) -> Result<usize> {
		let path = self.path.clone();
		let writer = self.writer()?;
		writer.write_all(b"]}")?;
		writer.flush().with_context(|| format!("flushing {path:?}"))?;
		self.writer = None;
		log::debug!("wrote {} features to {:?}", self.count, self.path);
		Ok(self.count)
	}

	fn writer(&mut self) -> Result<&mut BufWriter<File>> {
		self.writer.as_mut().context("writer is already closed")
	}
}

impl Drop for VectorDatasetWriter {
	fn drop(&mut self) {
		if self.writer.take().is_some() {
			log::warn!("removing incomplete dataset {:?}", self.path);
			if let Err(e) = fs::remove_file(&self.path) {
				log::warn!("could not remove {:?}: {e}", self.path);
			}
		}
	}
}
