use super::{Diagnostics, DropReason, split_read_window};
use crate::VectorDataset;
use anyhow::{Context, Result};
use geo::{Intersects, MultiPolygon};
use std::{collections::VecDeque, path::Path, rc::Rc};
use tilecut_core::{BBox, Crs, Tile, TileError};
use tilecut_geometry::{
	GeoFeature, Geometry, GeometryType, ReprojectOptions, normalize_geometry_type, reproject_geometry,
};

/// A lazy, single-pass sequence of features read for one tile.
///
/// Features are produced window by window in the order the windows were added,
/// and within each window in dataset order. Dropping the stream releases the
/// datasets it holds. The stream is neither `Send` nor restartable.
///
/// Features that cannot be delivered are skipped and recorded in
/// [`diagnostics`](Self::diagnostics).
pub struct FeatureStream {
	windows: VecDeque<WindowCursor>,
	target_crs: Crs,
	diagnostics: Diagnostics,
}

impl FeatureStream {
	/// A stream without any windows.
	pub fn empty(target_crs: Crs) -> Self {
		Self {
			windows: VecDeque::new(),
			target_crs,
			diagnostics: Diagnostics::new(),
		}
	}

	/// The CRS of the produced geometries.
	pub fn crs(&self) -> Crs {
		self.target_crs
	}

	/// The features dropped so far.
	pub fn diagnostics(&self) -> &Diagnostics {
		&self.diagnostics
	}

	/// Queues the windows of `other` behind the windows of this stream.
	pub fn append(&mut self, mut other: FeatureStream) {
		debug_assert_eq!(self.target_crs, other.target_crs);
		self.windows.append(&mut other.windows);
		self.diagnostics.merge(other.diagnostics);
	}

	/// Whether any window still has a feature whose envelope intersects its filter.
	///
	/// This only looks at envelopes, so a stream with candidates may still yield
	/// nothing once the geometries are clipped.
	pub fn has_candidates(&self) -> bool {
		self.windows.iter().any(WindowCursor::has_candidate)
	}

	/// Drains the stream and returns the features together with the diagnostics.
	pub fn collect_with_diagnostics(mut self) -> (Vec<GeoFeature>, Diagnostics) {
		let features = self.by_ref().collect();
		(features, self.diagnostics)
	}

	fn process(&mut self, window: &WindowCursor, feature: &GeoFeature) -> Option<GeoFeature> {
		let id = window.describe(feature);

		let geometry = if feature.geometry.is_valid() {
			feature.geometry.clone()
		} else {
			let repaired = feature.geometry.repair();
			if repaired.is_empty() || !repaired.is_valid() {
				self.diagnostics
					.record(DropReason::InvalidGeometry, format!("{id} is invalid and cannot be repaired"));
				return None;
			}
			repaired
		};

		let clipped = geometry.intersection(&window.filter_shape);
		if clipped.is_empty() {
			if geometry.to_geo().intersects(&window.filter_shape) {
				self.diagnostics.record(
					DropReason::GeometryTypeChanged,
					format!("{id} only touches the window"),
				);
			} else {
				log::trace!("{id} does not intersect {:?}", window.filter_box);
			}
			return None;
		}

		let original_type = feature.geometry.get_type();
		let clipped = if original_type == GeometryType::GeometryCollection {
			clipped
		} else {
			match normalize_geometry_type(clipped, original_type, true) {
				Ok(Some(g)) => g,
				Ok(None) | Err(_) => {
					self.diagnostics.record(
						DropReason::GeometryTypeChanged,
						format!("nothing of {id} is left as {original_type} after clipping"),
					);
					return None;
				}
			}
		};

		let geometry = if window.source_crs == self.target_crs {
			if !clipped.is_valid() {
				self.diagnostics
					.record(DropReason::InvalidGeometry, format!("{id} is invalid after clipping"));
				return None;
			}
			clipped
		} else {
			let options = ReprojectOptions {
				check_validity: window.check_validity,
				..ReprojectOptions::default()
			};
			match reproject_geometry(&clipped, window.source_crs, self.target_crs, options) {
				Ok(g) => g,
				Err(e) => {
					self.diagnostics.record(DropReason::ReprojectionFailed, format!("{id}: {e}"));
					return None;
				}
			}
		};

		Some(feature.with_geometry(geometry))
	}
}

impl Iterator for FeatureStream {
	type Item = GeoFeature;

	fn next(&mut self) -> Option<GeoFeature> {
		while let Some(mut window) = self.windows.pop_front() {
			while let Some(index) = window.next_candidate() {
				let dataset = Rc::clone(&window.dataset);
				if let Some(feature) = self.process(&window, &dataset.features()[index]) {
					self.windows.push_front(window);
					return Some(feature);
				}
			}
		}
		None
	}
}

impl std::fmt::Debug for FeatureStream {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FeatureStream")
			.field("windows", &self.windows.len())
			.field("target_crs", &self.target_crs)
			.field("dropped", &self.diagnostics.len())
			.finish()
	}
}

/// Segments per edge of a window that is reprojected into the dataset CRS.
const WINDOW_SEGMENTS: usize = 21;

/// Position of one read window inside a dataset.
struct WindowCursor {
	dataset: Rc<VectorDataset>,
	source_crs: Crs,
	filter_box: BBox,
	filter_shape: MultiPolygon<f64>,
	check_validity: bool,
	position: usize,
}

impl WindowCursor {
	/// The index of the next feature whose envelope intersects the filter box.
	fn next_candidate(&mut self) -> Option<usize> {
		let index = self.dataset.filter(&self.filter_box, self.position).next();
		self.position = index.map_or(self.dataset.len(), |i| i + 1);
		index
	}

	fn has_candidate(&self) -> bool {
		self.dataset.filter(&self.filter_box, self.position).next().is_some()
	}

	fn describe(&self, feature: &GeoFeature) -> String {
		match &feature.id {
			Some(id) => format!("feature {id} of {:?}", self.dataset.path()),
			None => format!("feature #{} of {:?}", self.position - 1, self.dataset.path()),
		}
	}
}

/// Reads the features of the dataset at `path` that fall into the window of `tile`.
///
/// The window is split at the pyramid edges (see [`split_read_window`]) and each
/// box is read on its own. Geometries are repaired, clipped to the box, brought
/// back to their original type and reprojected to the CRS of `tile`. Features
/// that fail one of those steps are skipped and recorded in the diagnostics.
///
/// # Errors
/// Only opening the dataset can fail; per-feature problems never abort the read.
pub fn read_vector_window(path: &Path, tile: &Tile, check_validity: bool) -> Result<FeatureStream> {
	let dataset = Rc::new(VectorDataset::open(path).with_context(|| format!("reading {tile} from {path:?}"))?);
	let mut stream = FeatureStream::empty(tile.crs());

	for bbox in split_read_window(tile) {
		match window_cursor(&dataset, &bbox, tile.crs()) {
			Ok(mut cursor) => {
				cursor.check_validity = check_validity;
				log::trace!("reading {path:?} with filter {:?}", cursor.filter_box);
				stream.windows.push_back(cursor);
			}
			Err(TileError::Topology(reason)) => {
				log::debug!("skipping window {bbox:?} of {tile}: {reason}");
			}
			Err(e) => return Err(e).with_context(|| format!("reading {tile} from {path:?}")),
		}
	}

	Ok(stream)
}

/// Builds the filter of one window in the CRS of the dataset.
fn window_cursor(dataset: &Rc<VectorDataset>, bbox: &BBox, tile_crs: Crs) -> Result<WindowCursor, TileError> {
	let source_crs = dataset.crs();

	let filter = if source_crs == tile_crs {
		Geometry::from_bbox(bbox)
	} else {
		let window = Geometry::from_bbox_densified(bbox, WINDOW_SEGMENTS);
		reproject_geometry(&window, tile_crs, source_crs, ReprojectOptions::default())?
	};
	let (Some(filter_box), Some(filter_shape)) = (filter.bounds(), filter.to_multi_polygon()) else {
		return Err(TileError::Topology(format!("window {bbox:?} has no area in {source_crs}")));
	};

	Ok(WindowCursor {
		dataset: Rc::clone(dataset),
		source_crs,
		filter_box,
		filter_shape,
		check_validity: true,
		position: 0,
	})
}
