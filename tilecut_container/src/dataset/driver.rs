use anyhow::{Result, bail};
use serde::Deserialize;
use std::{
	fmt::{self, Display},
	path::Path,
	str::FromStr,
};

/// On-disk vector formats.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(try_from = "String")]
pub enum VectorDriver {
	#[default]
	GeoJson,
}

impl VectorDriver {
	/// Guesses the driver from a file extension.
	pub fn from_path(path: &Path) -> Result<VectorDriver> {
		let extension = path
			.extension()
			.and_then(|e| e.to_str())
			.map(str::to_ascii_lowercase)
			.unwrap_or_default();
		match extension.as_str() {
			"geojson" | "json" => Ok(VectorDriver::GeoJson),
			_ => bail!("no vector driver for {path:?}"),
		}
	}

	pub fn extension(&self) -> &'static str {
		match self {
			VectorDriver::GeoJson => "geojson",
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			VectorDriver::GeoJson => "GeoJSON",
		}
	}
}

impl Display for VectorDriver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for VectorDriver {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_lowercase().as_str() {
			"geojson" => Ok(VectorDriver::GeoJson),
			_ => bail!("unknown vector driver '{s}'"),
		}
	}
}

impl TryFrom<String> for VectorDriver {
	type Error = anyhow::Error;

	fn try_from(value: String) -> Result<Self> {
		value.parse()
	}
}
