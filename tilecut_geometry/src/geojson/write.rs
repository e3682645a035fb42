use crate::{GeoCollection, GeoFeature, GeoProperties, GeoValue, Geometry};
use geo::{Coord, LineString, Polygon};
use serde_json::{Map, Value, json};
use tilecut_core::Crs;

/// The legacy `crs` member for `crs`, in OGC URN form.
pub fn crs_to_json(crs: &Crs) -> Value {
	json!({
		"type": "name",
		"properties": { "name": crs.urn() }
	})
}

impl Geometry {
	pub fn to_json(&self) -> Value {
		let coordinates = match self {
			Geometry::Point(g) => coord_to_json(&g.0),
			Geometry::LineString(g) => line_to_json(g),
			Geometry::Polygon(g) => polygon_to_json(g),
			Geometry::MultiPoint(g) => Value::Array(g.iter().map(|p| coord_to_json(&p.0)).collect()),
			Geometry::MultiLineString(g) => Value::Array(g.iter().map(line_to_json).collect()),
			Geometry::MultiPolygon(g) => Value::Array(g.iter().map(polygon_to_json).collect()),
			Geometry::GeometryCollection(members) => {
				return json!({
					"type": "GeometryCollection",
					"geometries": members.iter().map(Geometry::to_json).collect::<Vec<_>>(),
				});
			}
		};
		json!({ "type": self.get_type().as_str(), "coordinates": coordinates })
	}
}

impl GeoValue {
	pub fn to_json(&self) -> Value {
		match self {
			GeoValue::Bool(v) => Value::Bool(*v),
			GeoValue::Double(v) => serde_json::Number::from_f64(*v).map_or(Value::Null, Value::Number),
			GeoValue::Int(v) => Value::from(*v),
			GeoValue::Null => Value::Null,
			GeoValue::String(v) => Value::String(v.clone()),
			GeoValue::UInt(v) => Value::from(*v),
		}
	}
}

impl GeoProperties {
	pub fn to_json(&self) -> Value {
		Value::Object(self.iter().map(|(key, value)| (key.clone(), value.to_json())).collect())
	}
}

impl GeoFeature {
	pub fn to_json(&self) -> Value {
		let mut object = Map::new();
		object.insert("type".into(), Value::from("Feature"));
		if let Some(id) = &self.id {
			object.insert("id".into(), id.to_json());
		}
		object.insert("geometry".into(), self.geometry.to_json());
		object.insert("properties".into(), self.properties.to_json());
		Value::Object(object)
	}
}

impl GeoCollection {
	pub fn to_json(&self) -> Value {
		let mut object = Map::new();
		object.insert("type".into(), Value::from("FeatureCollection"));
		if let Some(crs) = &self.crs {
			object.insert("crs".into(), crs_to_json(crs));
		}
		object.insert(
			"features".into(),
			Value::Array(self.features.iter().map(GeoFeature::to_json).collect()),
		);
		Value::Object(object)
	}
}

fn coord_to_json(coord: &Coord<f64>) -> Value {
	json!([coord.x, coord.y])
}

fn line_to_json(line: &LineString<f64>) -> Value {
	Value::Array(line.coords().map(coord_to_json).collect())
}

fn polygon_to_json(polygon: &Polygon<f64>) -> Value {
	Value::Array(
		std::iter::once(polygon.exterior())
			.chain(polygon.interiors())
			.map(line_to_json)
			.collect(),
	)
}
