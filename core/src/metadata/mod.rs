//! Tags and attributes attached to entries, stored as JSON sidecars in the shadow folders.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Number;

mod store;
pub mod transforms;

pub use transforms::{add_attribute, add_tag, remove_attribute, remove_tag};

/// A `(key, value)` pair; keys are unique within a [`MetaData`] value.
pub type Attribute = (String, AttributeValue);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
	Bool(bool),
	Number(Number),
	String(String),
}

/// Annotations of a single entry, mirroring the sidecar file layout exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaData {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub attributes: Option<Vec<Attribute>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

impl MetaData {
	/// A value without tags and attributes is empty and never gets a sidecar file, whatever its
	/// title and description.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.tags.as_ref().map_or(true, Vec::is_empty)
			&& self.attributes.as_ref().map_or(true, Vec::is_empty)
	}

	#[must_use]
	pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
		self.attributes
			.as_deref()
			.and_then(|attributes| attributes.iter().find(|(k, _)| k == key))
			.map(|(_, value)| value)
	}

	#[must_use]
	pub fn has_tag(&self, tag: &str) -> bool {
		self.tags
			.as_deref()
			.is_some_and(|tags| tags.iter().any(|t| t == tag))
	}
}

impl fmt::Display for AttributeValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(value) => write!(f, "{value}"),
			Self::Number(value) => write!(f, "{value}"),
			Self::String(value) => f.write_str(value),
		}
	}
}

/// Parses loosely typed input: booleans and numbers are recognized, anything else is a string.
impl FromStr for AttributeValue {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"true" => Self::Bool(true),
			"false" => Self::Bool(false),
			s => s
				.parse::<i64>()
				.ok()
				.map(Number::from)
				.or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
				.map_or_else(|| Self::String(s.to_string()), Self::Number),
		})
	}
}

impl From<bool> for AttributeValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for AttributeValue {
	fn from(value: i64) -> Self {
		Self::Number(value.into())
	}
}

impl From<u64> for AttributeValue {
	fn from(value: u64) -> Self {
		Self::Number(value.into())
	}
}

impl From<&str> for AttributeValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for AttributeValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}
