//! Validity, repair and clipping on top of the `geo` algorithms.

use super::{Geometry, geometry::bbox_polygon};
use geo::{Area, BooleanOps, Intersects, MultiLineString, MultiPoint, MultiPolygon, Polygon, Validation};
use tilecut_core::BBox;

impl Geometry {
	/// OGC validity, with zero-area polygons counting as invalid.
	pub fn is_valid(&self) -> bool {
		match self {
			Geometry::Point(g) => g.is_valid(),
			Geometry::LineString(g) => g.is_valid(),
			Geometry::Polygon(g) => polygon_is_valid(g),
			Geometry::MultiPoint(g) => g.is_valid(),
			Geometry::MultiLineString(g) => g.is_valid(),
			Geometry::MultiPolygon(g) => g.is_valid() && g.0.iter().all(polygon_is_valid),
			Geometry::GeometryCollection(g) => g.iter().all(Geometry::is_valid),
		}
	}

	/// Removes self-intersections by re-noding polygonal geometries.
	///
	/// The result covers the same area as the input. Collapsed polygons become
	/// empty. Points and lines are returned unchanged. Single polygons stay
	/// `Polygon` unless the repair splits them.
	pub fn repair(&self) -> Geometry {
		let empty = MultiPolygon::<f64>::new(vec![]);
		match self {
			Geometry::Polygon(g) => polygonal(g.union(&empty), false),
			Geometry::MultiPolygon(g) => polygonal(g.union(&empty), true),
			Geometry::GeometryCollection(g) => Geometry::GeometryCollection(
				g.iter()
					.map(Geometry::repair)
					.filter(|member| !member.is_empty())
					.collect(),
			),
			_ => self.clone(),
		}
	}

	/// The part of the geometry inside `clip`.
	///
	/// The result keeps the dimension of the input. Single part inputs come back
	/// as multipart values when the clip splits them; empty results are empty
	/// multipart values (or an empty collection for collections).
	pub fn intersection(&self, clip: &MultiPolygon<f64>) -> Geometry {
		match self {
			Geometry::Point(g) => {
				if clip.intersects(g) {
					Geometry::Point(*g)
				} else {
					Geometry::MultiPoint(MultiPoint::new(vec![]))
				}
			}
			Geometry::MultiPoint(g) => {
				Geometry::MultiPoint(MultiPoint::new(g.iter().filter(|p| clip.intersects(*p)).copied().collect()))
			}
			Geometry::LineString(g) => lineal(clip.clip(&MultiLineString::new(vec![g.clone()]), false), false),
			Geometry::MultiLineString(g) => lineal(clip.clip(g, false), true),
			Geometry::Polygon(g) => polygonal(g.intersection(clip), false),
			Geometry::MultiPolygon(g) => polygonal(g.intersection(clip), true),
			Geometry::GeometryCollection(g) => Geometry::GeometryCollection(
				g.iter()
					.map(|member| member.intersection(clip))
					.filter(|member| !member.is_empty())
					.collect(),
			),
		}
	}

	/// The part of the geometry inside `bbox`.
	pub fn intersection_bbox(&self, bbox: &BBox) -> Geometry {
		self.intersection(&MultiPolygon::new(vec![bbox_polygon(bbox)]))
	}
}

fn polygon_is_valid(polygon: &Polygon<f64>) -> bool {
	polygon.is_valid() && polygon.unsigned_area() > 0.0
}

fn polygonal(mut result: MultiPolygon<f64>, multi: bool) -> Geometry {
	if !multi && result.0.len() == 1 {
		Geometry::Polygon(result.0.remove(0))
	} else {
		Geometry::MultiPolygon(result)
	}
}

fn lineal(mut result: MultiLineString<f64>, multi: bool) -> Geometry {
	if !multi && result.0.len() == 1 {
		Geometry::LineString(result.0.remove(0))
	} else {
		Geometry::MultiLineString(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::GeometryType;
	use approx::assert_relative_eq;
	use rstest::rstest;

	fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry {
		Geometry::new_polygon(vec![vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]])
	}

	fn area(geometry: &Geometry) -> f64 {
		geometry.to_geo().unsigned_area()
	}

	fn assert_bounds(geometry: &Geometry, expected: [f64; 4]) {
		let bounds = geometry.bounds().unwrap().as_array();
		for (a, b) in bounds.iter().zip(expected.iter()) {
			assert_relative_eq!(a, b, epsilon = 1e-6);
		}
	}

	#[test]
	fn validity() {
		assert!(square(0.0, 0.0, 1.0, 1.0).is_valid());
		assert!(Geometry::new_point([1.0, 1.0]).is_valid());
		assert!(!Geometry::new_point([f64::NAN, 1.0]).is_valid());
		let spike = Geometry::new_polygon(vec![vec![[0.0, 0.0], [2.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]);
		assert!(!spike.is_valid());
		let bowtie = Geometry::new_polygon(vec![vec![[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 2.0], [0.0, 0.0]]]);
		assert!(!bowtie.is_valid());
	}

	#[test]
	fn repair_valid_polygon_keeps_area() {
		let polygon = square(0.0, 0.0, 4.0, 2.0);
		let repaired = polygon.repair();
		assert_eq!(repaired.get_type(), GeometryType::Polygon);
		assert_bounds(&repaired, [0.0, 0.0, 4.0, 2.0]);
		assert_relative_eq!(area(&repaired), 8.0, epsilon = 1e-6);
	}

	#[test]
	fn repair_collapsed_polygon_is_empty() {
		let spike = Geometry::new_polygon(vec![vec![[0.0, 0.0], [2.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]);
		assert!(spike.repair().is_empty());
	}

	#[test]
	fn repair_bowtie_keeps_area() {
		let bowtie = Geometry::new_polygon(vec![vec![[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 2.0], [0.0, 0.0]]]);
		let repaired = bowtie.repair();
		assert!(!repaired.is_empty());
		assert_relative_eq!(area(&repaired), 2.0, epsilon = 1e-6);
	}

	#[test]
	fn repair_leaves_lines_alone() {
		let line = Geometry::new_line_string(vec![[0.0, 0.0], [1.0, 1.0], [0.0, 1.0], [1.0, 0.0]]);
		assert_eq!(line.repair(), line);
	}

	#[rstest]
	#[case(square(1.0, 1.0, 2.0, 2.0), GeometryType::Polygon, 1.0)]
	#[case(square(-1.0, -1.0, 2.0, 2.0), GeometryType::Polygon, 4.0)]
	#[case(square(20.0, 20.0, 30.0, 30.0), GeometryType::MultiPolygon, 0.0)]
	fn polygon_intersection(#[case] geometry: Geometry, #[case] expected: GeometryType, #[case] expected_area: f64) {
		let bbox = BBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
		let result = geometry.intersection_bbox(&bbox);
		assert_eq!(result.get_type(), expected);
		assert_relative_eq!(area(&result), expected_area, epsilon = 1e-6);
	}

	#[test]
	fn polygon_split_by_clip_becomes_multi() {
		let u_shape = Geometry::new_polygon(vec![vec![
			[0.0, 0.0],
			[3.0, 0.0],
			[3.0, 3.0],
			[2.0, 3.0],
			[2.0, 1.0],
			[1.0, 1.0],
			[1.0, 3.0],
			[0.0, 3.0],
			[0.0, 0.0],
		]]);
		let result = u_shape.intersection_bbox(&BBox::new(0.0, 2.0, 3.0, 3.0).unwrap());
		assert_eq!(result.get_type(), GeometryType::MultiPolygon);
		assert_relative_eq!(area(&result), 2.0, epsilon = 1e-6);
	}

	#[test]
	fn line_and_point_intersection() {
		let bbox = BBox::new(0.0, 0.0, 10.0, 10.0).unwrap();

		let line = Geometry::new_line_string(vec![[-5.0, 5.0], [5.0, 5.0]]);
		let result = line.intersection_bbox(&bbox);
		assert_eq!(result.get_type(), GeometryType::LineString);
		assert_bounds(&result, [0.0, 5.0, 5.0, 5.0]);

		assert_eq!(
			Geometry::new_point([5.0, 5.0]).intersection_bbox(&bbox),
			Geometry::new_point([5.0, 5.0])
		);
		assert!(Geometry::new_point([50.0, 5.0]).intersection_bbox(&bbox).is_empty());

		let points = Geometry::new_multi_point(vec![[1.0, 1.0], [11.0, 1.0]]);
		assert_eq!(
			points.intersection_bbox(&bbox),
			Geometry::new_multi_point(vec![[1.0, 1.0]])
		);
	}

	#[test]
	fn collection_intersection_drops_empty_members() {
		let bbox = BBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
		let collection = Geometry::new_collection(vec![
			Geometry::new_point([1.0, 1.0]),
			Geometry::new_point([20.0, 1.0]),
			square(5.0, 5.0, 15.0, 15.0),
		]);
		let Geometry::GeometryCollection(members) = collection.intersection_bbox(&bbox) else {
			panic!("expected a collection");
		};
		assert_eq!(
			members.iter().map(Geometry::get_type).collect::<Vec<_>>(),
			vec![GeometryType::Point, GeometryType::Polygon]
		);
	}
}
