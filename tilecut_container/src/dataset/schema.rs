use serde::Deserialize;
use std::collections::BTreeMap;
use tilecut_geometry::{GeoProperties, GeoValue, GeometryType};

/// Declared type of a property field.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
	#[serde(alias = "string")]
	Str,
	#[serde(alias = "integer")]
	Int,
	Float,
	#[serde(alias = "boolean")]
	Bool,
}

impl PropertyType {
	/// Whether `value` can be stored in a field of this type. `Null` fits every field.
	pub fn accepts(&self, value: &GeoValue) -> bool {
		matches!(
			(self, value),
			(_, GeoValue::Null)
				| (PropertyType::Str, GeoValue::String(_))
				| (PropertyType::Int, GeoValue::Int(_) | GeoValue::UInt(_))
				| (PropertyType::Float, GeoValue::Double(_) | GeoValue::Int(_) | GeoValue::UInt(_))
				| (PropertyType::Bool, GeoValue::Bool(_))
		)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			PropertyType::Str => "str",
			PropertyType::Int => "int",
			PropertyType::Float => "float",
			PropertyType::Bool => "bool",
		}
	}
}

/// Geometry type and property fields of an output dataset.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VectorSchema {
	pub geometry: GeometryType,
	#[serde(default)]
	pub properties: BTreeMap<String, PropertyType>,
}

impl VectorSchema {
	pub fn new(geometry: GeometryType) -> Self {
		Self {
			geometry,
			properties: BTreeMap::new(),
		}
	}

	#[must_use]
	pub fn with_property(mut self, name: &str, property_type: PropertyType) -> Self {
		self.properties.insert(name.to_string(), property_type);
		self
	}

	/// Keeps the declared fields of `properties`.
	///
	/// # Errors
	/// Returns a description of the first declared field whose value has the wrong type.
	pub fn conform(&self, properties: &GeoProperties) -> Result<GeoProperties, String> {
		let mut result = GeoProperties::new();
		for (key, value) in properties.iter() {
			let Some(property_type) = self.properties.get(key) else {
				continue;
			};
			if !property_type.accepts(value) {
				return Err(format!(
					"property '{key}' is {}, expected {}",
					value.type_name(),
					property_type.as_str()
				));
			}
			result.insert(key.clone(), value.clone());
		}
		Ok(result)
	}
}
