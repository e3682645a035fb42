//! Geometry type normalization.
//!
//! Clipping and reprojection can change the type of a geometry: a clipped polygon
//! may come back as a collection, a multipart value, or a lower dimension. The
//! normalizer maps such results back onto a declared target type, or reports that
//! nothing of that type survived.
//!
//! ```
//! use tilecut_geometry::{Geometry, GeometryType, normalize_geometry_type};
//!
//! let mixed = Geometry::new_collection(vec![
//! 	Geometry::new_polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]),
//! 	Geometry::new_line_string(vec![[1.0, 1.0], [2.0, 2.0]]),
//! ]);
//! let normalized = normalize_geometry_type(mixed, GeometryType::Polygon, true).unwrap().unwrap();
//! assert_eq!(normalized.get_type(), GeometryType::MultiPolygon);
//! ```

use crate::{Geometry, GeometryType};
use geo::{MultiLineString, MultiPoint, MultiPolygon};
use tilecut_core::TileError;

/// Returns `geometry` as a value of `target` or of its multipart type.
///
/// - an exact type match is returned unchanged
/// - collections are flattened recursively; members of other families are
///   dropped and the survivors are assembled into the multipart type
/// - multipart geometries of the target family are returned if `allow_multipart` is set
/// - single part geometries of the target family are returned as they are, or
///   promoted to the multipart type if `target` is a multipart type
///
/// `Ok(None)` means that nothing of the target family is left, including the case
/// of a collection without any matching member.
///
/// # Errors
/// Returns [`TileError::UnsupportedGeometryType`] if `target` is a collection.
pub fn normalize_geometry_type(
	geometry: Geometry,
	target: GeometryType,
	allow_multipart: bool,
) -> Result<Option<Geometry>, TileError> {
	let Some(multi) = target.multi() else {
		return Err(TileError::UnsupportedGeometryType(target.to_string()));
	};

	let source = geometry.get_type();
	if source == target {
		return Ok(Some(geometry));
	}

	if let Geometry::GeometryCollection(members) = geometry {
		let mut parts = Parts::new(multi);
		for member in members {
			if let Some(normalized) = normalize_geometry_type(member, target, allow_multipart)? {
				parts.push(normalized);
			}
		}
		return Ok(parts.finish());
	}

	if source.multi() != Some(multi) {
		return Ok(None);
	}
	if source.is_multi() && !allow_multipart {
		return Ok(None);
	}
	Ok(Some(if target.is_multi() { geometry.into_multi() } else { geometry }))
}

/// Collects the parts of one family into a multipart value.
enum Parts {
	Points(Vec<geo::Point<f64>>),
	Lines(Vec<geo::LineString<f64>>),
	Polygons(Vec<geo::Polygon<f64>>),
}

impl Parts {
	fn new(multi: GeometryType) -> Parts {
		match multi {
			GeometryType::MultiPoint => Parts::Points(Vec::new()),
			GeometryType::MultiLineString => Parts::Lines(Vec::new()),
			_ => Parts::Polygons(Vec::new()),
		}
	}

	fn push(&mut self, geometry: Geometry) {
		match (self, geometry.into_multi()) {
			(Parts::Points(v), Geometry::MultiPoint(g)) => v.extend(g.0),
			(Parts::Lines(v), Geometry::MultiLineString(g)) => v.extend(g.0),
			(Parts::Polygons(v), Geometry::MultiPolygon(g)) => v.extend(g.0),
			_ => {}
		}
	}

	fn finish(self) -> Option<Geometry> {
		let geometry = match self {
			Parts::Points(v) => Geometry::MultiPoint(MultiPoint::new(v)),
			Parts::Lines(v) => Geometry::MultiLineString(MultiLineString::new(v)),
			Parts::Polygons(v) => Geometry::MultiPolygon(MultiPolygon::new(v)),
		};
		if geometry.is_empty() { None } else { Some(geometry) }
	}
}
