use super::{Diagnostics, DropReason};
use crate::{VectorDatasetWriter, VectorDriver, VectorSchema};
use anyhow::{Context, Result};
use std::{
	fs, io,
	path::{Path, PathBuf},
};
use tilecut_core::{Tile, TileError};
use tilecut_geometry::{GeoFeature, normalize_geometry_type};

/// Outcome of [`write_vector_window`].
#[derive(Clone, Debug, PartialEq)]
pub struct WriteReport {
	pub path: PathBuf,
	/// Number of features in the written file, 0 if no file was created.
	pub written: usize,
	pub diagnostics: Diagnostics,
}

impl WriteReport {
	pub fn file_written(&self) -> bool {
		self.written > 0
	}
}

/// Writes the part of `features` inside `tile` to `path`.
///
/// An existing file at `path` is always removed first. Each geometry is clipped
/// to the unbuffered tile and brought to the schema's geometry type; properties
/// are reduced to the schema's fields. Features that do not fit are dropped and
/// recorded in the report. A file is only created if at least one feature is left.
///
/// # Errors
/// Fails if the old file cannot be removed, if the schema declares a geometry
/// collection, or if writing the file fails. A partially written file is removed
/// before the error is returned.
pub fn write_vector_window(
	path: &Path,
	tile: &Tile,
	features: impl IntoIterator<Item = GeoFeature>,
	schema: &VectorSchema,
	driver: VectorDriver,
) -> Result<WriteReport> {
	match fs::remove_file(path) {
		Ok(()) => log::debug!("removed existing {path:?}"),
		Err(e) if e.kind() == io::ErrorKind::NotFound => {}
		Err(e) => return Err(e).with_context(|| format!("removing existing {path:?}")),
	}

	if schema.geometry.multi().is_none() {
		return Err(TileError::UnsupportedGeometryType(schema.geometry.to_string()))
			.with_context(|| format!("writing {tile} to {path:?}"));
	}

	let mut diagnostics = Diagnostics::new();
	let mut output = Vec::new();
	let clip = tile.bounds();

	for (index, feature) in features.into_iter().enumerate() {
		let id = match &feature.id {
			Some(id) => format!("feature {id}"),
			None => format!("feature #{index}"),
		};

		let clipped = feature.geometry.intersection_bbox(&clip);
		if clipped.is_empty() {
			diagnostics.record(DropReason::EmptyGeometry, format!("{id} lies outside {tile}"));
			continue;
		}

		let Some(geometry) = normalize_geometry_type(clipped, schema.geometry, true)
			.with_context(|| format!("writing {tile} to {path:?}"))?
		else {
			diagnostics.record(
				DropReason::GeometryTypeChanged,
				format!("nothing of {id} is left as {} inside {tile}", schema.geometry),
			);
			continue;
		};

		let properties = match schema.conform(&feature.properties) {
			Ok(properties) => properties,
			Err(message) => {
				diagnostics.record(DropReason::SchemaMismatch, format!("{id}: {message}"));
				continue;
			}
		};

		output.push(GeoFeature {
			id: feature.id,
			geometry,
			properties,
		});
	}

	if output.is_empty() {
		log::debug!("nothing to write for {tile}");
		return Ok(WriteReport {
			path: path.to_path_buf(),
			written: 0,
			diagnostics,
		});
	}

	let mut writer = VectorDatasetWriter::create(path, schema, tile.crs(), driver)
		.with_context(|| format!("writing {tile} to {path:?}"))?;
	for feature in &output {
		writer
			.write_feature(feature)
			.with_context(|| format!("writing {tile} to {path:?}"))?;
	}
	let written = writer.finish().with_context(|| format!("writing {tile} to {path:?}"))?;

	Ok(WriteReport {
		path: path.to_path_buf(),
		written,
		diagnostics,
	})
}
