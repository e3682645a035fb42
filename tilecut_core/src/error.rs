use crate::Crs;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the geometry pipeline.
///
/// Geometry-level operations return these directly so callers can branch on the
/// variant. Dataset-level operations wrap them into `anyhow::Error`; use
/// `downcast_ref::<TileError>()` to get them back.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TileError {
	/// A CRS identifier that cannot be resolved to a known EPSG definition.
	#[error("invalid CRS '{0}'")]
	InvalidCrs(String),

	/// A geometry lies (partly) outside the registered valid bounds of the destination CRS.
	#[error("geometry exceeds the valid bounds of {crs}")]
	BoundsViolation { crs: Crs },

	/// Reprojection or repair produced an invalid or empty geometry.
	#[error("topology error: {0}")]
	Topology(String),

	/// Normalization was requested against a type outside the supported families.
	#[error("unsupported geometry type '{0}'")]
	UnsupportedGeometryType(String),

	/// The dataset path does not exist or cannot be opened.
	#[error("source {path:?} is unavailable: {reason}")]
	SourceUnavailable { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_messages() {
		assert_eq!(TileError::InvalidCrs("foo".into()).to_string(), "invalid CRS 'foo'");
		assert_eq!(
			TileError::BoundsViolation { crs: Crs::WEB_MERCATOR }.to_string(),
			"geometry exceeds the valid bounds of EPSG:3857"
		);
		assert_eq!(
			TileError::SourceUnavailable {
				path: PathBuf::from("/tmp/missing.geojson"),
				reason: "not found".into()
			}
			.to_string(),
			"source \"/tmp/missing.geojson\" is unavailable: not found"
		);
	}

	#[test]
	fn survives_anyhow_round_trip() {
		let err: anyhow::Error = TileError::Topology("empty".into()).into();
		assert_eq!(
			err.downcast_ref::<TileError>(),
			Some(&TileError::Topology("empty".into()))
		);
	}
}
