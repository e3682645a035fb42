//! Coordinate reference systems identified by EPSG code, and the registry of
//! their valid extents.
//!
//! A [`Crs`] can only be constructed for codes present in the `crs-definitions`
//! database, so every CRS handed to the reprojection engine has a proj4 definition.
//!
//! ```
//! use tilecut_core::Crs;
//!
//! let crs = Crs::parse("urn:ogc:def:crs:EPSG::3857").unwrap();
//! assert_eq!(crs, Crs::WEB_MERCATOR);
//! assert_eq!(crs.to_string(), "EPSG:3857");
//! assert!(Crs::WGS84.is_geographic());
//! ```

use crate::{BBox, TileError};
use std::{
	fmt::{self, Debug, Display},
	str::FromStr,
};

/// Valid extents of well known CRSs, always expressed in EPSG:4326 degrees.
static CRS_BOUNDS: &[(u16, [f64; 4])] = &[
	(4326, [-180.0, -90.0, 180.0, 90.0]),
	(3857, [-180.0, -85.0511, 180.0, 85.0511]),
	(3035, [-10.6700, 34.5000, 31.5500, 71.0500]),
];

/// A coordinate reference system, identified by its EPSG code.
///
/// Two values are equal iff their codes are equal.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Crs {
	epsg: u16,
}

impl Crs {
	/// The canonical geographic CRS (longitude/latitude on WGS84).
	pub const WGS84: Crs = Crs { epsg: 4326 };
	/// Spherical web mercator.
	pub const WEB_MERCATOR: Crs = Crs { epsg: 3857 };

	/// Resolves a numeric EPSG code.
	pub fn from_epsg(code: u32) -> Result<Crs, TileError> {
		let epsg = u16::try_from(code).map_err(|_| TileError::InvalidCrs(format!("EPSG:{code}")))?;
		if crs_definitions::from_code(epsg).is_none() {
			return Err(TileError::InvalidCrs(format!("EPSG:{code}")));
		}
		Ok(Crs { epsg })
	}

	/// Resolves a textual identifier.
	///
	/// Accepts bare codes (`"4326"`), `"EPSG:4326"` in any case, OGC URNs
	/// (`"urn:ogc:def:crs:EPSG::4326"`) and `"CRS84"` variants, which map to EPSG:4326.
	pub fn parse(text: &str) -> Result<Crs, TileError> {
		let lower = text.trim().to_ascii_lowercase();
		if lower.ends_with("crs84") {
			return Ok(Crs::WGS84);
		}

		let code = if let Some(rest) = lower.strip_prefix("epsg:") {
			rest
		} else if lower.starts_with("urn:ogc:def:crs:epsg:") {
			lower.rsplit(':').next().unwrap_or_default()
		} else {
			lower.as_str()
		};

		let code = code
			.parse::<u32>()
			.map_err(|_| TileError::InvalidCrs(text.to_string()))?;
		Crs::from_epsg(code).map_err(|_| TileError::InvalidCrs(text.to_string()))
	}

	#[must_use]
	pub fn epsg(&self) -> u16 {
		self.epsg
	}

	/// The proj4 definition of this CRS.
	pub fn proj_string(&self) -> Result<&'static str, TileError> {
		crs_definitions::from_code(self.epsg)
			.map(|def| def.proj4)
			.ok_or_else(|| TileError::InvalidCrs(self.to_string()))
	}

	/// Returns `true` for longitude/latitude systems, whose transforms work in radians.
	#[must_use]
	pub fn is_geographic(&self) -> bool {
		self.proj_string().is_ok_and(|proj| proj.contains("+proj=longlat"))
	}

	/// The registered valid extent of this CRS in EPSG:4326 degrees, if any.
	#[must_use]
	pub fn registered_bounds(&self) -> Option<BBox> {
		CRS_BOUNDS
			.iter()
			.find(|(epsg, _)| *epsg == self.epsg)
			.map(|(_, [left, bottom, right, top])| BBox {
				left: *left,
				bottom: *bottom,
				right: *right,
				top: *top,
			})
	}

	/// The OGC URN, as written into GeoJSON `crs` members.
	#[must_use]
	pub fn urn(&self) -> String {
		format!("urn:ogc:def:crs:EPSG::{}", self.epsg)
	}
}

impl Display for Crs {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "EPSG:{}", self.epsg)
	}
}

impl Debug for Crs {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Crs({})", self.epsg)
	}
}

impl FromStr for Crs {
	type Err = TileError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Crs::parse(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("4326", 4326)]
	#[case("EPSG:4326", 4326)]
	#[case("epsg:3857", 3857)]
	#[case(" EPSG:3035 ", 3035)]
	#[case("urn:ogc:def:crs:EPSG::3857", 3857)]
	#[case("urn:ogc:def:crs:EPSG:6.6:4326", 4326)]
	#[case("urn:ogc:def:crs:OGC:1.3:CRS84", 4326)]
	#[case("CRS84", 4326)]
	fn parse_identifiers(#[case] text: &str, #[case] epsg: u16) {
		assert_eq!(Crs::parse(text).unwrap().epsg(), epsg);
	}

	#[rstest]
	#[case("")]
	#[case("EPSG:")]
	#[case("EPSG:abc")]
	#[case("EPSG:1")]
	#[case("EPSG:999999")]
	#[case("mercator")]
	fn parse_rejects(#[case] text: &str) {
		assert_eq!(Crs::parse(text), Err(TileError::InvalidCrs(text.to_string())));
	}

	#[test]
	fn equality_by_code() {
		assert_eq!(Crs::from_epsg(4326).unwrap(), Crs::WGS84);
		assert_ne!(Crs::WGS84, Crs::WEB_MERCATOR);
	}

	#[test]
	fn geographic_flag() {
		assert!(Crs::WGS84.is_geographic());
		assert!(!Crs::WEB_MERCATOR.is_geographic());
		assert!(!Crs::from_epsg(3035).unwrap().is_geographic());
	}

	#[test]
	fn registered_bounds() {
		assert_eq!(
			Crs::WEB_MERCATOR.registered_bounds().unwrap().as_tuple(),
			(-180.0, -85.0511, 180.0, 85.0511)
		);
		assert_eq!(
			Crs::from_epsg(3035).unwrap().registered_bounds().unwrap().as_tuple(),
			(-10.67, 34.5, 31.55, 71.05)
		);
		assert!(Crs::from_epsg(32632).unwrap().registered_bounds().is_none());
	}

	#[test]
	fn urn_and_display() {
		assert_eq!(Crs::WEB_MERCATOR.urn(), "urn:ogc:def:crs:EPSG::3857");
		assert_eq!(Crs::WGS84.to_string(), "EPSG:4326");
		assert_eq!(format!("{:?}", Crs::WGS84), "Crs(4326)");
	}
}
