use anyhow::{Result, ensure};
use std::fmt::Debug;

/// An axis-aligned rectangle `(left, bottom, right, top)` in the units of some CRS.
///
/// The CRS itself is not stored; a `BBox` is always interpreted in the context of
/// the tile, pyramid or dataset it belongs to.
///
/// # Examples
///
/// ```
/// use tilecut_core::BBox;
///
/// let mut bbox = BBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
/// bbox.extend(&BBox::new(-12.0, -3.0, 8.0, 6.0).unwrap());
/// assert_eq!(bbox.as_tuple(), (-12.0, -5.0, 10.0, 6.0));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct BBox {
	pub left: f64,
	pub bottom: f64,
	pub right: f64,
	pub top: f64,
}

impl BBox {
	/// Creates a new `BBox` from `left, bottom, right, top`.
	///
	/// # Errors
	/// Returns an error if a value is not finite or if the box is inverted.
	pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Result<BBox> {
		BBox {
			left,
			bottom,
			right,
			top,
		}
		.checked()
	}

	/// Same as [`new`](Self::new), but sorts the coordinates instead of failing on an inverted box.
	pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<BBox> {
		BBox {
			left: x0.min(x1),
			bottom: y0.min(y1),
			right: x0.max(x1),
			top: y0.max(y1),
		}
		.checked()
	}

	#[must_use]
	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.left, self.bottom, self.right, self.top)
	}

	#[must_use]
	pub fn as_array(&self) -> [f64; 4] {
		[self.left, self.bottom, self.right, self.top]
	}

	#[must_use]
	pub fn width(&self) -> f64 {
		self.right - self.left
	}

	#[must_use]
	pub fn height(&self) -> f64 {
		self.top - self.bottom
	}

	/// Expands the bounding box in place so that it includes `other`.
	pub fn extend(&mut self, other: &BBox) {
		self.left = self.left.min(other.left);
		self.bottom = self.bottom.min(other.bottom);
		self.right = self.right.max(other.right);
		self.top = self.top.max(other.top);
	}

	/// Non-mutating version of [`extend`](Self::extend).
	#[must_use]
	pub fn extended(mut self, other: &BBox) -> BBox {
		self.extend(other);
		self
	}

	/// Returns the overlapping area of both boxes, or `None` if they share no area.
	///
	/// Boxes that only touch along an edge or a corner have no common area.
	///
	/// ```
	/// use tilecut_core::BBox;
	///
	/// let a = BBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
	/// let b = BBox::new(5.0, 5.0, 15.0, 15.0).unwrap();
	/// assert_eq!(a.intersection(&b).unwrap().as_tuple(), (5.0, 5.0, 10.0, 10.0));
	///
	/// let c = BBox::new(10.0, 0.0, 20.0, 10.0).unwrap();
	/// assert!(a.intersection(&c).is_none());
	/// ```
	#[must_use]
	pub fn intersection(&self, other: &BBox) -> Option<BBox> {
		let left = self.left.max(other.left);
		let bottom = self.bottom.max(other.bottom);
		let right = self.right.min(other.right);
		let top = self.top.min(other.top);
		if left < right && bottom < top {
			Some(BBox {
				left,
				bottom,
				right,
				top,
			})
		} else {
			None
		}
	}

	/// Returns `true` if both boxes overlap or touch.
	#[must_use]
	pub fn intersects(&self, other: &BBox) -> bool {
		self.left <= other.right && other.left <= self.right && self.bottom <= other.top && other.bottom <= self.top
	}

	/// Returns `true` if `other` lies completely inside this box. Shared edges count as inside.
	#[must_use]
	pub fn contains(&self, other: &BBox) -> bool {
		self.left <= other.left && self.bottom <= other.bottom && self.right >= other.right && self.top >= other.top
	}

	/// Returns the box shifted by `dx` and `dy`.
	#[must_use]
	pub fn translated(&self, dx: f64, dy: f64) -> BBox {
		BBox {
			left: self.left + dx,
			bottom: self.bottom + dy,
			right: self.right + dx,
			top: self.top + dy,
		}
	}

	/// Returns the box grown by `dx` on the left and right and by `dy` on the bottom and top.
	#[must_use]
	pub fn buffered(&self, dx: f64, dy: f64) -> BBox {
		BBox {
			left: self.left - dx,
			bottom: self.bottom - dy,
			right: self.right + dx,
			top: self.top + dy,
		}
	}

	fn checked(self) -> Result<Self> {
		ensure!(
			self.left.is_finite() && self.bottom.is_finite() && self.right.is_finite() && self.top.is_finite(),
			"bounding box {self:?} must have finite coordinates"
		);
		ensure!(
			self.left <= self.right,
			"left ({}) must be <= right ({})",
			self.left,
			self.right
		);
		ensure!(
			self.bottom <= self.top,
			"bottom ({}) must be <= top ({})",
			self.bottom,
			self.top
		);
		Ok(self)
	}
}

impl Debug for BBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "BBox({}, {}, {}, {})", self.left, self.bottom, self.right, self.top)
	}
}

impl TryFrom<Vec<f64>> for BBox {
	type Error = anyhow::Error;

	/// Builds a `BBox` from exactly four values `[left, bottom, right, top]`.
	fn try_from(input: Vec<f64>) -> Result<Self> {
		ensure!(
			input.len() == 4,
			"bounding box must have 4 elements (left, bottom, right, top), got {}",
			input.len()
		);
		BBox::new(input[0], input[1], input[2], input[3])
	}
}

impl TryFrom<[f64; 4]> for BBox {
	type Error = anyhow::Error;

	fn try_from(input: [f64; 4]) -> Result<Self> {
		BBox::new(input[0], input[1], input[2], input[3])
	}
}
