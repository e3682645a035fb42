use std::fmt::{self, Display};

/// Why a feature was left out of a read or write.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DropReason {
	/// The geometry was invalid and could not be repaired.
	InvalidGeometry,
	/// Clipping left nothing of the feature's geometry type.
	GeometryTypeChanged,
	/// Reprojecting the clipped geometry failed.
	ReprojectionFailed,
	/// Nothing of the geometry lies inside the tile.
	EmptyGeometry,
	/// A property value does not fit the output schema.
	SchemaMismatch,
}

impl Display for DropReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			DropReason::InvalidGeometry => "invalid geometry",
			DropReason::GeometryTypeChanged => "geometry type changed",
			DropReason::ReprojectionFailed => "reprojection failed",
			DropReason::EmptyGeometry => "empty geometry",
			DropReason::SchemaMismatch => "schema mismatch",
		})
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct DroppedFeature {
	pub reason: DropReason,
	pub message: String,
}

/// Record of the features dropped during one read or write call.
///
/// Every entry is also emitted as a `log` warning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
	dropped: Vec<DroppedFeature>,
}

impl Diagnostics {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&mut self, reason: DropReason, message: impl Into<String>) {
		let message = message.into();
		log::warn!("dropping feature ({reason}): {message}");
		self.dropped.push(DroppedFeature { reason, message });
	}

	pub fn dropped(&self) -> &[DroppedFeature] {
		&self.dropped
	}

	pub fn len(&self) -> usize {
		self.dropped.len()
	}

	pub fn is_empty(&self) -> bool {
		self.dropped.is_empty()
	}

	/// Number of features dropped for `reason`.
	pub fn count(&self, reason: DropReason) -> usize {
		self.dropped.iter().filter(|d| d.reason == reason).count()
	}

	pub fn merge(&mut self, other: Diagnostics) {
		self.dropped.extend(other.dropped);
	}
}
