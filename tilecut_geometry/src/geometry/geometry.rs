use super::GeometryType;
use geo::{BoundingRect, Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Rect};
use tilecut_core::BBox;

/// A geometry in an implicit CRS.
///
/// Single and multipart variants wrap the `geo` types. Collections are kept as a
/// recursive list of `Geometry` values so that their members stay tagged.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
	Point(Point<f64>),
	LineString(LineString<f64>),
	Polygon(Polygon<f64>),
	MultiPoint(MultiPoint<f64>),
	MultiLineString(MultiLineString<f64>),
	MultiPolygon(MultiPolygon<f64>),
	GeometryCollection(Vec<Geometry>),
}

impl Geometry {
	pub fn new_point(value: [f64; 2]) -> Self {
		Self::Point(Point::from(value))
	}
	pub fn new_line_string(value: Vec<[f64; 2]>) -> Self {
		Self::LineString(LineString::from(value))
	}
	pub fn new_polygon(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::Polygon(polygon_from_rings(value))
	}
	pub fn new_multi_point(value: Vec<[f64; 2]>) -> Self {
		Self::MultiPoint(MultiPoint::from(value))
	}
	pub fn new_multi_line_string(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::MultiLineString(MultiLineString::new(value.into_iter().map(LineString::from).collect()))
	}
	pub fn new_multi_polygon(value: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
		Self::MultiPolygon(MultiPolygon::new(value.into_iter().map(polygon_from_rings).collect()))
	}
	pub fn new_collection(value: Vec<Geometry>) -> Self {
		Self::GeometryCollection(value)
	}

	/// The rectangle as a closed, counter-clockwise polygon.
	pub fn from_bbox(bbox: &BBox) -> Self {
		Self::Polygon(bbox_polygon(bbox))
	}

	/// The outline of `bbox` with each edge split into `segments` parts.
	///
	/// Straight edges become curves in most other projections, so windows are
	/// densified before they are reprojected.
	pub fn from_bbox_densified(bbox: &BBox, segments: usize) -> Self {
		let segments = segments.max(1);
		let corners = [
			Coord { x: bbox.left, y: bbox.bottom },
			Coord { x: bbox.right, y: bbox.bottom },
			Coord { x: bbox.right, y: bbox.top },
			Coord { x: bbox.left, y: bbox.top },
		];
		let mut ring = Vec::with_capacity(segments * 4 + 1);
		for (i, start) in corners.iter().enumerate() {
			let end = corners[(i + 1) % corners.len()];
			for step in 0..segments {
				let t = step as f64 / segments as f64;
				ring.push(Coord {
					x: start.x + (end.x - start.x) * t,
					y: start.y + (end.y - start.y) * t,
				});
			}
		}
		ring.push(corners[0]);
		Self::Polygon(Polygon::new(LineString::new(ring), vec![]))
	}

	pub fn get_type(&self) -> GeometryType {
		match self {
			Geometry::Point(_) => GeometryType::Point,
			Geometry::LineString(_) => GeometryType::LineString,
			Geometry::Polygon(_) => GeometryType::Polygon,
			Geometry::MultiPoint(_) => GeometryType::MultiPoint,
			Geometry::MultiLineString(_) => GeometryType::MultiLineString,
			Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
			Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Geometry::Point(_) => false,
			Geometry::LineString(g) => g.0.is_empty(),
			Geometry::Polygon(g) => g.exterior().0.is_empty(),
			Geometry::MultiPoint(g) => g.0.is_empty(),
			Geometry::MultiLineString(g) => g.0.iter().all(|l| l.0.is_empty()),
			Geometry::MultiPolygon(g) => g.0.iter().all(|p| p.exterior().0.is_empty()),
			Geometry::GeometryCollection(g) => g.iter().all(Geometry::is_empty),
		}
	}

	/// The envelope of the geometry, or `None` if it is empty.
	pub fn bounds(&self) -> Option<BBox> {
		let rect = match self {
			Geometry::Point(g) => Some(g.bounding_rect()),
			Geometry::LineString(g) => g.bounding_rect(),
			Geometry::Polygon(g) => g.bounding_rect(),
			Geometry::MultiPoint(g) => g.bounding_rect(),
			Geometry::MultiLineString(g) => g.bounding_rect(),
			Geometry::MultiPolygon(g) => g.bounding_rect(),
			Geometry::GeometryCollection(g) => {
				return g
					.iter()
					.filter_map(Geometry::bounds)
					.reduce(|a, b| a.extended(&b));
			}
		};
		rect.map(|r| rect_to_bbox(&r))
	}

	/// Converts single part geometries into their multipart counterpart.
	pub fn into_multi(self) -> Self {
		match self {
			Geometry::Point(g) => Geometry::MultiPoint(MultiPoint::new(vec![g])),
			Geometry::LineString(g) => Geometry::MultiLineString(MultiLineString::new(vec![g])),
			Geometry::Polygon(g) => Geometry::MultiPolygon(MultiPolygon::new(vec![g])),
			Geometry::MultiPoint(_)
			| Geometry::MultiLineString(_)
			| Geometry::MultiPolygon(_)
			| Geometry::GeometryCollection(_) => self,
		}
	}

	/// Returns the polygonal content as a `MultiPolygon`, or `None` for other types.
	pub fn to_multi_polygon(&self) -> Option<MultiPolygon<f64>> {
		match self {
			Geometry::Polygon(g) => Some(MultiPolygon::new(vec![g.clone()])),
			Geometry::MultiPolygon(g) => Some(g.clone()),
			_ => None,
		}
	}

	pub fn to_geo(&self) -> geo::Geometry<f64> {
		match self {
			Geometry::Point(g) => geo::Geometry::Point(*g),
			Geometry::LineString(g) => geo::Geometry::LineString(g.clone()),
			Geometry::Polygon(g) => geo::Geometry::Polygon(g.clone()),
			Geometry::MultiPoint(g) => geo::Geometry::MultiPoint(g.clone()),
			Geometry::MultiLineString(g) => geo::Geometry::MultiLineString(g.clone()),
			Geometry::MultiPolygon(g) => geo::Geometry::MultiPolygon(g.clone()),
			Geometry::GeometryCollection(g) => {
				geo::Geometry::GeometryCollection(geo::GeometryCollection(g.iter().map(Geometry::to_geo).collect()))
			}
		}
	}

	pub fn new_example() -> Self {
		Self::new_multi_polygon(vec![
			vec![
				vec![[0.0, 0.0], [5.0, 0.0], [2.5, 4.0], [0.0, 0.0]],
				vec![[2.0, 1.0], [2.5, 2.0], [3.0, 1.0], [2.0, 1.0]],
			],
			vec![
				vec![[6.0, 0.0], [9.0, 0.0], [9.0, 4.0], [6.0, 4.0], [6.0, 0.0]],
				vec![[7.0, 1.0], [7.0, 3.0], [8.0, 3.0], [8.0, 1.0], [7.0, 1.0]],
			],
		])
	}
}

impl From<geo::Geometry<f64>> for Geometry {
	fn from(value: geo::Geometry<f64>) -> Self {
		match value {
			geo::Geometry::Point(g) => Geometry::Point(g),
			geo::Geometry::Line(g) => Geometry::LineString(LineString::new(vec![g.start, g.end])),
			geo::Geometry::LineString(g) => Geometry::LineString(g),
			geo::Geometry::Polygon(g) => Geometry::Polygon(g),
			geo::Geometry::MultiPoint(g) => Geometry::MultiPoint(g),
			geo::Geometry::MultiLineString(g) => Geometry::MultiLineString(g),
			geo::Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g),
			geo::Geometry::GeometryCollection(g) => {
				Geometry::GeometryCollection(g.0.into_iter().map(Geometry::from).collect())
			}
			geo::Geometry::Rect(g) => Geometry::Polygon(g.to_polygon()),
			geo::Geometry::Triangle(g) => Geometry::Polygon(g.to_polygon()),
		}
	}
}

fn polygon_from_rings(rings: Vec<Vec<[f64; 2]>>) -> Polygon<f64> {
	let mut rings = rings.into_iter().map(LineString::from);
	let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
	Polygon::new(exterior, rings.collect())
}

pub(crate) fn bbox_polygon(bbox: &BBox) -> Polygon<f64> {
	Rect::new(
		Coord {
			x: bbox.left,
			y: bbox.bottom,
		},
		Coord {
			x: bbox.right,
			y: bbox.top,
		},
	)
	.to_polygon()
}

fn rect_to_bbox(rect: &Rect<f64>) -> BBox {
	BBox {
		left: rect.min().x,
		bottom: rect.min().y,
		right: rect.max().x,
		top: rect.max().y,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn types_and_multi() {
		let point = Geometry::new_point([1.0, 2.0]);
		assert_eq!(point.get_type(), GeometryType::Point);
		assert_eq!(point.into_multi().get_type(), GeometryType::MultiPoint);

		let polygon = Geometry::new_polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]);
		assert_eq!(polygon.clone().into_multi().get_type(), GeometryType::MultiPolygon);
		assert_eq!(polygon.to_multi_polygon().map(|m| m.0.len()), Some(1));
		assert_eq!(Geometry::new_point([0.0, 0.0]).to_multi_polygon(), None);
	}

	#[test]
	fn emptiness() {
		assert!(!Geometry::new_point([0.0, 0.0]).is_empty());
		assert!(Geometry::new_line_string(vec![]).is_empty());
		assert!(Geometry::new_multi_polygon(vec![]).is_empty());
		assert!(Geometry::new_collection(vec![]).is_empty());
		assert!(Geometry::new_collection(vec![Geometry::new_multi_point(vec![])]).is_empty());
		assert!(!Geometry::new_example().is_empty());
	}

	#[test]
	fn bounds() {
		assert_eq!(
			Geometry::new_example().bounds().unwrap().as_tuple(),
			(0.0, 0.0, 9.0, 4.0)
		);
		let collection = Geometry::new_collection(vec![
			Geometry::new_point([-5.0, 1.0]),
			Geometry::new_line_string(vec![[0.0, 0.0], [3.0, 7.0]]),
		]);
		assert_eq!(collection.bounds().unwrap().as_tuple(), (-5.0, 0.0, 3.0, 7.0));
		assert_eq!(Geometry::new_multi_point(vec![]).bounds(), None);
	}

	#[test]
	fn from_bbox() {
		let bbox = BBox::new(1.0, 2.0, 3.0, 4.0).unwrap();
		let geometry = Geometry::from_bbox(&bbox);
		assert_eq!(geometry.get_type(), GeometryType::Polygon);
		assert_eq!(geometry.bounds(), Some(bbox));
	}

	#[test]
	fn from_bbox_densified() {
		let bbox = BBox::new(0.0, 0.0, 4.0, 2.0).unwrap();
		let Geometry::Polygon(polygon) = Geometry::from_bbox_densified(&bbox, 4) else {
			panic!("expected a polygon");
		};
		let ring = polygon.exterior();
		assert_eq!(ring.0.len(), 17);
		assert!(ring.is_closed());
		assert_eq!(ring.0[1], Coord { x: 1.0, y: 0.0 });
		assert_eq!(ring.0[5], Coord { x: 4.0, y: 0.5 });
		assert_eq!(Geometry::Polygon(polygon.clone()).bounds(), Some(bbox));
		assert!(Geometry::Polygon(polygon).is_valid());
	}

	#[test]
	fn geo_conversion() {
		let geometry = Geometry::new_collection(vec![Geometry::new_example(), Geometry::new_point([1.0, 1.0])]);
		assert_eq!(Geometry::from(geometry.to_geo()), geometry);

		let rect = geo::Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
		assert_eq!(Geometry::from(geo::Geometry::Rect(rect)).get_type(), GeometryType::Polygon);
	}
}
