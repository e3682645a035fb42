use std::{
	cmp::Ordering,
	fmt::{Debug, Display},
};

/// A scalar property value.
#[derive(Clone, PartialEq)]
pub enum GeoValue {
	Bool(bool),
	Double(f64),
	Int(i64),
	Null,
	String(String),
	UInt(u64),
}

impl GeoValue {
	/// Name of the variant, used in schema mismatch messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			GeoValue::Bool(_) => "bool",
			GeoValue::Double(_) => "float",
			GeoValue::Int(_) | GeoValue::UInt(_) => "int",
			GeoValue::Null => "null",
			GeoValue::String(_) => "str",
		}
	}

	fn variant_order(&self) -> u8 {
		match self {
			GeoValue::String(_) => 0,
			GeoValue::Double(_) => 1,
			GeoValue::Int(_) => 2,
			GeoValue::UInt(_) => 3,
			GeoValue::Bool(_) => 4,
			GeoValue::Null => 5,
		}
	}
}

impl Debug for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::String(v) => f.debug_tuple("String").field(v).finish(),
			Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
			Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
			Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Self::Null => f.debug_tuple("Null").finish(),
		}
	}
}

impl From<&str> for GeoValue {
	fn from(value: &str) -> Self {
		GeoValue::String(value.to_string())
	}
}

impl From<String> for GeoValue {
	fn from(value: String) -> Self {
		GeoValue::String(value)
	}
}

impl From<i32> for GeoValue {
	fn from(value: i32) -> Self {
		if value < 0 {
			GeoValue::Int(i64::from(value))
		} else {
			GeoValue::UInt(value as u64)
		}
	}
}

impl From<i64> for GeoValue {
	fn from(value: i64) -> Self {
		GeoValue::Int(value)
	}
}

impl From<u64> for GeoValue {
	fn from(value: u64) -> Self {
		GeoValue::UInt(value)
	}
}

impl From<f64> for GeoValue {
	fn from(value: f64) -> Self {
		GeoValue::Double(value)
	}
}

impl From<bool> for GeoValue {
	fn from(value: bool) -> Self {
		GeoValue::Bool(value)
	}
}

impl Eq for GeoValue {}

impl PartialOrd for GeoValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for GeoValue {
	fn cmp(&self, other: &Self) -> Ordering {
		use GeoValue::*;
		match (self, other) {
			(String(a), String(b)) => a.cmp(b),
			(Double(a), Double(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
			(Int(a), Int(b)) => a.cmp(b),
			(UInt(a), UInt(b)) => a.cmp(b),
			(Bool(a), Bool(b)) => a.cmp(b),
			_ => self.variant_order().cmp(&other.variant_order()),
		}
	}
}

impl Display for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			GeoValue::Bool(v) => write!(f, "{v}"),
			GeoValue::Double(v) => write!(f, "{v}"),
			GeoValue::Int(v) => write!(f, "{v}"),
			GeoValue::Null => write!(f, "null"),
			GeoValue::String(v) => write!(f, "{v}"),
			GeoValue::UInt(v) => write!(f, "{v}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ordering() {
		assert!(GeoValue::from("a") < GeoValue::from("b"));
		assert!(GeoValue::from(1.0) < GeoValue::from(2.0));
		assert!(GeoValue::from(-2) < GeoValue::from(-1));
		assert!(GeoValue::from(false) < GeoValue::from(true));
		assert!(GeoValue::from("z") < GeoValue::from(1.0));
		assert!(GeoValue::from(1u64) < GeoValue::Null);
	}

	#[test]
	fn from_i32_picks_sign() {
		assert_eq!(GeoValue::from(-3), GeoValue::Int(-3));
		assert_eq!(GeoValue::from(3), GeoValue::UInt(3));
	}

	#[test]
	fn display_and_type_name() {
		assert_eq!(GeoValue::from("Nice").to_string(), "Nice");
		assert_eq!(GeoValue::from(2.5).to_string(), "2.5");
		assert_eq!(GeoValue::Null.to_string(), "null");
		assert_eq!(GeoValue::from(7u64).type_name(), "int");
		assert_eq!(GeoValue::from(true).type_name(), "bool");
	}
}
