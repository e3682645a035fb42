use crate::Geometry;
use geo::{Coord, MapCoords};
use proj4rs::{proj::Proj, transform::transform};
use tilecut_core::{Crs, TileError};

/// Coordinate transform between two CRSs, backed by `proj4rs`.
///
/// Geographic coordinates are passed in and returned in degrees.
pub struct Transformer {
	source: Crs,
	target: Crs,
	source_proj: Proj,
	target_proj: Proj,
	source_is_geographic: bool,
	target_is_geographic: bool,
}

impl Transformer {
	pub fn new(source: Crs, target: Crs) -> Result<Transformer, TileError> {
		Ok(Transformer {
			source,
			target,
			source_proj: build_proj(source)?,
			target_proj: build_proj(target)?,
			source_is_geographic: source.is_geographic(),
			target_is_geographic: target.is_geographic(),
		})
	}

	pub fn source(&self) -> Crs {
		self.source
	}

	pub fn target(&self) -> Crs {
		self.target
	}

	/// Transforms a single coordinate. Non-finite results are an error.
	pub fn transform_coord(&self, coord: Coord<f64>) -> Result<Coord<f64>, TileError> {
		let mut point = if self.source_is_geographic {
			(coord.x.to_radians(), coord.y.to_radians(), 0.0)
		} else {
			(coord.x, coord.y, 0.0)
		};

		transform(&self.source_proj, &self.target_proj, &mut point).map_err(|e| {
			TileError::Topology(format!(
				"transform of ({}, {}) from {} to {} failed: {e:?}",
				coord.x, coord.y, self.source, self.target
			))
		})?;

		let (x, y) = if self.target_is_geographic {
			(point.0.to_degrees(), point.1.to_degrees())
		} else {
			(point.0, point.1)
		};

		if !(x.is_finite() && y.is_finite()) {
			return Err(TileError::Topology(format!(
				"transform of ({}, {}) from {} to {} is not finite",
				coord.x, coord.y, self.source, self.target
			)));
		}
		Ok(Coord { x, y })
	}

	/// Transforms every coordinate of `geometry`. No clipping or repair is applied.
	pub fn transform_geometry(&self, geometry: &Geometry) -> Result<Geometry, TileError> {
		let f = |c: Coord<f64>| self.transform_coord(c);
		Ok(match geometry {
			Geometry::Point(g) => Geometry::Point(g.try_map_coords(f)?),
			Geometry::LineString(g) => Geometry::LineString(g.try_map_coords(f)?),
			Geometry::Polygon(g) => Geometry::Polygon(g.try_map_coords(f)?),
			Geometry::MultiPoint(g) => Geometry::MultiPoint(g.try_map_coords(f)?),
			Geometry::MultiLineString(g) => Geometry::MultiLineString(g.try_map_coords(f)?),
			Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.try_map_coords(f)?),
			Geometry::GeometryCollection(g) => Geometry::GeometryCollection(
				g.iter()
					.map(|member| self.transform_geometry(member))
					.collect::<Result<Vec<_>, _>>()?,
			),
		})
	}
}

fn build_proj(crs: Crs) -> Result<Proj, TileError> {
	Proj::from_proj_string(crs.proj_string()?).map_err(|e| TileError::InvalidCrs(format!("{crs}: {e:?}")))
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn wgs84_to_mercator() {
		let transformer = Transformer::new(Crs::WGS84, Crs::WEB_MERCATOR).unwrap();
		let c = transformer.transform_coord(Coord { x: 0.0, y: 0.0 }).unwrap();
		assert_relative_eq!(c.x, 0.0, epsilon = 1e-6);
		assert_relative_eq!(c.y, 0.0, epsilon = 1e-6);

		let c = transformer.transform_coord(Coord { x: 180.0, y: 0.0 }).unwrap();
		assert_relative_eq!(c.x, 20_037_508.342_789_244, epsilon = 1e-3);
	}

	#[test]
	fn round_trip() {
		let forward = Transformer::new(Crs::WGS84, Crs::WEB_MERCATOR).unwrap();
		let backward = Transformer::new(Crs::WEB_MERCATOR, Crs::WGS84).unwrap();
		for (x, y) in [(10.0, 51.5), (-122.4, 37.8), (139.7, 35.7)] {
			let c = backward
				.transform_coord(forward.transform_coord(Coord { x, y }).unwrap())
				.unwrap();
			assert_relative_eq!(c.x, x, epsilon = 1e-6);
			assert_relative_eq!(c.y, y, epsilon = 1e-6);
		}
	}

	#[test]
	fn geometry_keeps_structure() {
		let transformer = Transformer::new(Crs::WGS84, Crs::WEB_MERCATOR).unwrap();
		let geometry = Geometry::new_collection(vec![Geometry::new_example(), Geometry::new_point([1.0, 1.0])]);
		let result = transformer.transform_geometry(&geometry).unwrap();
		let Geometry::GeometryCollection(members) = result else {
			panic!("expected a collection");
		};
		assert_eq!(members.len(), 2);
		assert_eq!(members[0].get_type(), crate::GeometryType::MultiPolygon);
	}
}
