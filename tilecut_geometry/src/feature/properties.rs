use super::GeoValue;
use std::{
	collections::{BTreeMap, btree_map},
	fmt::Debug,
};

/// Property mapping of a feature, ordered by key.
#[derive(Clone, Default, PartialEq)]
pub struct GeoProperties {
	properties: BTreeMap<String, GeoValue>,
}

impl GeoProperties {
	pub fn new() -> GeoProperties {
		GeoProperties {
			properties: BTreeMap::new(),
		}
	}
	pub fn insert(&mut self, key: String, value: GeoValue) {
		self.properties.insert(key, value);
	}
	pub fn remove(&mut self, key: &str) -> Option<GeoValue> {
		self.properties.remove(key)
	}
	pub fn get(&self, key: &str) -> Option<&GeoValue> {
		self.properties.get(key)
	}
	pub fn contains_key(&self, key: &str) -> bool {
		self.properties.contains_key(key)
	}
	pub fn len(&self) -> usize {
		self.properties.len()
	}
	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}
	pub fn iter(&self) -> btree_map::Iter<'_, String, GeoValue> {
		self.properties.iter()
	}
	/// Keeps only the entries for which `keep` returns `true`.
	pub fn retain(&mut self, mut keep: impl FnMut(&str, &GeoValue) -> bool) {
		self.properties.retain(|k, v| keep(k, v));
	}
}

impl IntoIterator for GeoProperties {
	type Item = (String, GeoValue);
	type IntoIter = btree_map::IntoIter<String, GeoValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.into_iter()
	}
}

impl From<Vec<(&str, GeoValue)>> for GeoProperties {
	fn from(value: Vec<(&str, GeoValue)>) -> Self {
		GeoProperties {
			properties: value.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
		}
	}
}

impl FromIterator<(String, GeoValue)> for GeoProperties {
	fn from_iter<T: IntoIterator<Item = (String, GeoValue)>>(iter: T) -> Self {
		GeoProperties {
			properties: BTreeMap::from_iter(iter),
		}
	}
}

impl Debug for GeoProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.properties.iter()).finish()
	}
}
