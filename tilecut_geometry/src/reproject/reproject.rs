use super::Transformer;
use crate::Geometry;
use tilecut_core::{Crs, TileError};

/// Switches of [`reproject_geometry`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReprojectOptions {
	/// Fail with [`TileError::BoundsViolation`] instead of clipping geometries that
	/// leave the registered bounds of the destination CRS.
	pub error_on_out_of_bounds: bool,
	/// Fail with [`TileError::Topology`] if a transformed geometry is invalid or empty.
	pub check_validity: bool,
}

impl Default for ReprojectOptions {
	fn default() -> Self {
		ReprojectOptions {
			error_on_out_of_bounds: false,
			check_validity: true,
		}
	}
}

/// Reprojects `geometry` from `source` to `target`.
///
/// When both CRSs are equal, the geometry is only repaired. When `target` has
/// registered bounds and is not EPSG:4326, the geometry is first transformed to
/// EPSG:4326, clipped to those bounds and then transformed to `target`. Otherwise
/// it is transformed directly. Every transformed result is repaired.
///
/// ```
/// use tilecut_core::Crs;
/// use tilecut_geometry::{Geometry, ReprojectOptions, reproject_geometry};
///
/// let polygon = Geometry::new_polygon(vec![vec![[0.0, 80.0], [10.0, 80.0], [10.0, 89.0], [0.0, 89.0], [0.0, 80.0]]]);
/// let projected = reproject_geometry(&polygon, Crs::WGS84, Crs::WEB_MERCATOR, ReprojectOptions::default()).unwrap();
/// assert!(projected.bounds().unwrap().top < 20_037_508.35);
/// ```
pub fn reproject_geometry(
	geometry: &Geometry,
	source: Crs,
	target: Crs,
	options: ReprojectOptions,
) -> Result<Geometry, TileError> {
	if source == target {
		return Ok(geometry.repair());
	}

	match target.registered_bounds() {
		Some(bounds) if target != Crs::WGS84 => {
			let geographic = transform_step(geometry, source, Crs::WGS84, options.check_validity)?;
			if options.error_on_out_of_bounds
				&& !geographic.bounds().is_some_and(|geometry_bounds| bounds.contains(&geometry_bounds))
			{
				return Err(TileError::BoundsViolation { crs: target });
			}
			let clipped = geographic.intersection_bbox(&bounds);
			if clipped.is_empty() {
				log::debug!("geometry lies outside the registered bounds of {target}");
			} else {
				log::trace!("clipped geometry to the registered bounds {bounds:?} of {target}");
			}
			transform_step(&clipped, Crs::WGS84, target, options.check_validity)
		}
		_ => transform_step(geometry, source, target, options.check_validity),
	}
}

fn transform_step(geometry: &Geometry, source: Crs, target: Crs, check_validity: bool) -> Result<Geometry, TileError> {
	if source == target {
		return Ok(geometry.repair());
	}

	log::trace!("transforming {} from {source} to {target}", geometry.get_type());
	let transformed = Transformer::new(source, target)?.transform_geometry(geometry)?.repair();
	if check_validity && !(transformed.is_valid() && !transformed.is_empty()) {
		return Err(TileError::Topology(format!(
			"invalid geometry after reprojection from {source} to {target}"
		)));
	}
	Ok(transformed)
}
