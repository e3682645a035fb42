use serde::{Deserialize, Serialize};
use std::{
	fmt::{self, Display},
	str::FromStr,
};
use tilecut_core::TileError;

/// Type tag of a [`Geometry`](crate::Geometry).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GeometryType {
	Point,
	LineString,
	Polygon,
	MultiPoint,
	MultiLineString,
	MultiPolygon,
	GeometryCollection,
}

impl GeometryType {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			GeometryType::Point => "Point",
			GeometryType::LineString => "LineString",
			GeometryType::Polygon => "Polygon",
			GeometryType::MultiPoint => "MultiPoint",
			GeometryType::MultiLineString => "MultiLineString",
			GeometryType::MultiPolygon => "MultiPolygon",
			GeometryType::GeometryCollection => "GeometryCollection",
		}
	}

	/// The multipart type of this type's family, or `None` for collections.
	///
	/// ```
	/// use tilecut_geometry::GeometryType;
	///
	/// assert_eq!(GeometryType::Polygon.multi(), Some(GeometryType::MultiPolygon));
	/// assert_eq!(GeometryType::MultiPolygon.multi(), Some(GeometryType::MultiPolygon));
	/// assert_eq!(GeometryType::GeometryCollection.multi(), None);
	/// ```
	#[must_use]
	pub fn multi(&self) -> Option<GeometryType> {
		match self {
			GeometryType::Point | GeometryType::MultiPoint => Some(GeometryType::MultiPoint),
			GeometryType::LineString | GeometryType::MultiLineString => Some(GeometryType::MultiLineString),
			GeometryType::Polygon | GeometryType::MultiPolygon => Some(GeometryType::MultiPolygon),
			GeometryType::GeometryCollection => None,
		}
	}

	#[must_use]
	pub fn is_multi(&self) -> bool {
		matches!(
			self,
			GeometryType::MultiPoint | GeometryType::MultiLineString | GeometryType::MultiPolygon
		)
	}

	/// Returns `true` if both types map to the same multipart type.
	#[must_use]
	pub fn same_family(&self, other: &GeometryType) -> bool {
		match (self.multi(), other.multi()) {
			(Some(a), Some(b)) => a == b,
			_ => false,
		}
	}
}

impl Display for GeometryType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for GeometryType {
	type Err = TileError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"Point" => GeometryType::Point,
			"LineString" => GeometryType::LineString,
			"Polygon" => GeometryType::Polygon,
			"MultiPoint" => GeometryType::MultiPoint,
			"MultiLineString" => GeometryType::MultiLineString,
			"MultiPolygon" => GeometryType::MultiPolygon,
			"GeometryCollection" => GeometryType::GeometryCollection,
			_ => return Err(TileError::UnsupportedGeometryType(s.to_string())),
		})
	}
}
