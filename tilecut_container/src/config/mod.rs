//! YAML configuration of process outputs.

mod output;
pub use output::*;

use anyhow::{Context, Result};
use serde::Deserialize;
use tilecut_core::{BBox, Crs, GridDefinition};

/// A built-in grid given by name, or a custom grid.
///
/// ```yaml
/// grid:
///   crs: EPSG:3035
///   bounds: [2000000, 1000000, 6000000, 5000000]
///   shape: [1, 1] # rows, cols
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GridConfig {
	Named(String),
	Custom(CustomGrid),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CustomGrid {
	pub crs: String,
	pub bounds: [f64; 4],
	pub shape: [u32; 2],
	#[serde(default)]
	pub is_global: bool,
}

impl GridConfig {
	pub fn to_grid(&self) -> Result<GridDefinition> {
		match self {
			GridConfig::Named(name) => GridDefinition::from_name(name),
			GridConfig::Custom(custom) => custom.to_grid(),
		}
	}
}

impl CustomGrid {
	pub fn to_grid(&self) -> Result<GridDefinition> {
		let crs = Crs::parse(&self.crs).with_context(|| format!("grid crs '{}'", self.crs))?;
		let bounds = BBox::try_from(self.bounds).context("grid bounds")?;
		GridDefinition::new(crs, bounds, self.shape[0], self.shape[1], self.is_global)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn named_and_custom() {
		let grid: GridConfig = serde_yaml_ng::from_str("geodetic").unwrap();
		assert_eq!(grid.to_grid().unwrap(), GridDefinition::geodetic());

		let grid: GridConfig = serde_yaml_ng::from_str("crs: EPSG:4326\nbounds: [-180, -90, 180, 90]\nshape: [1, 2]\nis_global: true").unwrap();
		assert_eq!(grid.to_grid().unwrap(), GridDefinition::geodetic());
	}

	#[test]
	fn invalid_custom_grids() {
		let grid: GridConfig = serde_yaml_ng::from_str("crs: EPSG:4326\nbounds: [-180, -90, 180, 90]\nshape: [1, 1]").unwrap();
		assert!(grid.to_grid().is_err());

		let grid: GridConfig = serde_yaml_ng::from_str("crs: nowhere\nbounds: [0, 0, 1, 1]\nshape: [1, 1]").unwrap();
		assert!(grid.to_grid().is_err());
	}

	#[test]
	fn custom_grid_fields() {
		let grid: GridConfig = serde_yaml_ng::from_str("crs: EPSG:3035\nbounds: [0, 0, 10, 10]\nshape: [2, 2]").unwrap();
		assert_eq!(
			grid,
			GridConfig::Custom(CustomGrid {
				crs: "EPSG:3035".into(),
				bounds: [0.0, 0.0, 10.0, 10.0],
				shape: [2, 2],
				is_global: false,
			})
		);

		let result = serde_yaml_ng::from_str::<GridConfig>("crs: EPSG:3035\nbounds: [0, 0, 10, 10]\nshape: [2, 2]\nrows: 4");
		assert!(result.is_err());
	}
}
