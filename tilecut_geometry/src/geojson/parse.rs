use crate::{GeoCollection, GeoFeature, GeoProperties, GeoValue, Geometry};
use anyhow::{Context, Result, anyhow, bail, ensure};
use serde_json::{Map, Value};
use tilecut_core::Crs;

type Position = [f64; 2];

pub fn parse_geojson(json: &str) -> Result<GeoCollection> {
	let value: Value = serde_json::from_str(json).context("invalid JSON")?;
	parse_geojson_collection(&value)
}

pub fn parse_geojson_collection(value: &Value) -> Result<GeoCollection> {
	let object = as_object(value, "FeatureCollection")?;
	check_type(object, "FeatureCollection")?;

	let crs = object.get("crs").map(parse_geojson_crs).transpose()?;

	let features = match object.get("features") {
		Some(Value::Array(entries)) => entries
			.iter()
			.enumerate()
			.map(|(index, entry)| parse_geojson_feature(entry).with_context(|| format!("feature {index}")))
			.collect::<Result<Vec<_>>>()?,
		Some(_) => bail!("'features' must be an array"),
		None => Vec::new(),
	};

	Ok(GeoCollection { crs, features })
}

pub fn parse_geojson_feature(value: &Value) -> Result<GeoFeature> {
	let object = as_object(value, "Feature")?;
	check_type(object, "Feature")?;

	let id = match object.get("id") {
		None | Some(Value::Null) => None,
		Some(Value::String(s)) => Some(GeoValue::from(s.as_str())),
		Some(Value::Number(n)) => Some(parse_geojson_number(n)?),
		Some(other) => bail!("expected a string or number as id, but got {other}"),
	};

	let geometry = object
		.get("geometry")
		.ok_or(anyhow!("feature is missing 'geometry'"))?;
	let geometry = parse_geojson_geometry(geometry)?;

	let properties = match object.get("properties") {
		None | Some(Value::Null) => GeoProperties::new(),
		Some(Value::Object(map)) => parse_geojson_properties(map)?,
		Some(_) => bail!("'properties' must be an object"),
	};

	Ok(GeoFeature {
		id,
		geometry,
		properties,
	})
}

pub fn parse_geojson_geometry(value: &Value) -> Result<Geometry> {
	let object = as_object(value, "geometry")?;
	let geometry_type = object
		.get("type")
		.and_then(Value::as_str)
		.ok_or(anyhow!("geometry must have a type"))?;

	if geometry_type == "GeometryCollection" {
		let Some(Value::Array(members)) = object.get("geometries") else {
			bail!("GeometryCollection must have 'geometries'");
		};
		return Ok(Geometry::GeometryCollection(
			members.iter().map(parse_geojson_geometry).collect::<Result<Vec<_>>>()?,
		));
	}

	let coordinates = object
		.get("coordinates")
		.ok_or(anyhow!("geometry must have coordinates"))?;

	let geometry = match geometry_type {
		"Point" => Geometry::new_point(parse_position(coordinates)?),
		"LineString" => Geometry::new_line_string(parse_positions(coordinates)?),
		"Polygon" => Geometry::new_polygon(parse_rings(coordinates)?),
		"MultiPoint" => Geometry::new_multi_point(parse_positions(coordinates)?),
		"MultiLineString" => Geometry::new_multi_line_string(parse_rings(coordinates)?),
		"MultiPolygon" => Geometry::new_multi_polygon(
			as_array(coordinates)?
				.iter()
				.map(parse_rings)
				.collect::<Result<Vec<_>>>()?,
		),
		_ => bail!("unknown geometry type '{geometry_type}'"),
	};

	Ok(geometry)
}

/// Parses a legacy GeoJSON `crs` member.
///
/// Both the `name` form (`{"type": "name", "properties": {"name": "EPSG:3857"}}`)
/// and the `EPSG` form (`{"type": "EPSG", "properties": {"code": 3857}}`) are accepted.
pub fn parse_geojson_crs(value: &Value) -> Result<Crs> {
	let object = as_object(value, "crs")?;
	let properties = object
		.get("properties")
		.and_then(Value::as_object)
		.ok_or(anyhow!("crs must have properties"))?;

	let crs = match object.get("type").and_then(Value::as_str) {
		Some("name") => {
			let name = properties
				.get("name")
				.and_then(Value::as_str)
				.ok_or(anyhow!("named crs must have a name"))?;
			Crs::parse(name)?
		}
		Some("EPSG") => {
			let code = properties
				.get("code")
				.and_then(Value::as_u64)
				.ok_or(anyhow!("EPSG crs must have a numeric code"))?;
			Crs::from_epsg(u32::try_from(code)?)?
		}
		Some(other) => bail!("unsupported crs type '{other}'"),
		None => bail!("crs must have a type"),
	};
	Ok(crs)
}

fn parse_geojson_properties(map: &Map<String, Value>) -> Result<GeoProperties> {
	map.iter()
		.map(|(key, value)| Ok((key.clone(), parse_geojson_value(value)?)))
		.collect()
}

/// Converts a JSON property value. Arrays and objects are kept as their JSON text.
fn parse_geojson_value(value: &Value) -> Result<GeoValue> {
	Ok(match value {
		Value::Null => GeoValue::Null,
		Value::Bool(b) => GeoValue::Bool(*b),
		Value::Number(n) => parse_geojson_number(n)?,
		Value::String(s) => GeoValue::String(s.clone()),
		Value::Array(_) | Value::Object(_) => GeoValue::String(value.to_string()),
	})
}

fn parse_geojson_number(number: &serde_json::Number) -> Result<GeoValue> {
	if let Some(v) = number.as_u64() {
		Ok(GeoValue::UInt(v))
	} else if let Some(v) = number.as_i64() {
		Ok(GeoValue::Int(v))
	} else {
		number
			.as_f64()
			.map(GeoValue::Double)
			.ok_or(anyhow!("invalid number {number}"))
	}
}

fn check_type(object: &Map<String, Value>, name: &str) -> Result<()> {
	let object_type = object
		.get("type")
		.and_then(Value::as_str)
		.ok_or_else(|| anyhow!("{name} must have a type"))?;

	if object_type != name {
		bail!("type must be '{name}', but is '{object_type}'")
	}
	Ok(())
}

fn as_object<'a>(value: &'a Value, name: &str) -> Result<&'a Map<String, Value>> {
	value.as_object().ok_or_else(|| anyhow!("{name} must be an object"))
}

fn as_array(value: &Value) -> Result<&Vec<Value>> {
	value.as_array().ok_or_else(|| anyhow!("coordinates must be an array"))
}

fn parse_position(value: &Value) -> Result<Position> {
	let entries = as_array(value)?;
	ensure!(
		entries.len() >= 2,
		"a position must have at least 2 values, got {}",
		entries.len()
	);
	let x = entries[0].as_f64().ok_or(anyhow!("x must be a number"))?;
	let y = entries[1].as_f64().ok_or(anyhow!("y must be a number"))?;
	Ok([x, y])
}

fn parse_positions(value: &Value) -> Result<Vec<Position>> {
	as_array(value)?.iter().map(parse_position).collect()
}

fn parse_rings(value: &Value) -> Result<Vec<Vec<Position>>> {
	as_array(value)?.iter().map(parse_positions).collect()
}
