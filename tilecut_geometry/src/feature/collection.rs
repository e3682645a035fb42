use super::GeoFeature;
use tilecut_core::Crs;

/// A list of features sharing one CRS.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoCollection {
	/// The declared CRS, if the source named one.
	pub crs: Option<Crs>,
	pub features: Vec<GeoFeature>,
}

impl GeoCollection {
	pub fn new(crs: Option<Crs>, features: Vec<GeoFeature>) -> Self {
		Self { crs, features }
	}
}
