use super::{GeoProperties, GeoValue};
use crate::Geometry;

/// A geometry with an optional id and its properties.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
	pub id: Option<GeoValue>,
	pub geometry: Geometry,
	pub properties: GeoProperties,
}

impl GeoFeature {
	pub fn new(geometry: Geometry) -> Self {
		Self {
			id: None,
			geometry,
			properties: GeoProperties::new(),
		}
	}

	pub fn set_id<T>(&mut self, id: T)
	where
		GeoValue: From<T>,
	{
		self.id = Some(GeoValue::from(id));
	}

	pub fn set_properties(&mut self, properties: GeoProperties) {
		self.properties = properties;
	}

	pub fn set_property<T>(&mut self, key: &str, value: T)
	where
		GeoValue: From<T>,
	{
		self.properties.insert(key.to_string(), GeoValue::from(value));
	}

	/// Returns a copy of this feature carrying `geometry` instead.
	pub fn with_geometry(&self, geometry: Geometry) -> Self {
		Self {
			id: self.id.clone(),
			geometry,
			properties: self.properties.clone(),
		}
	}

	pub fn new_example() -> Self {
		Self {
			id: Some(GeoValue::from(13u64)),
			geometry: Geometry::new_example(),
			properties: GeoProperties::from(vec![
				("name", GeoValue::from("Nice")),
				("population", GeoValue::from(348_085)),
				("is_nice", GeoValue::from(true)),
			]),
		}
	}
}
