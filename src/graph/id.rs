use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque node identifier.
///
/// Identifiers are whatever JSON value the producer put in `id`/`parent`,
/// usually a string or an integer. They are copied through untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Value);

impl NodeId {
	/// Wrap any JSON value as an identifier.
	pub fn new(value: impl Into<Value>) -> Self {
		Self(value.into())
	}

	/// The underlying JSON value.
	pub fn as_value(&self) -> &Value {
		&self.0
	}

	/// Boolean coercion of the identifier: `null`, `false`, `0` and `""` are
	/// false, everything else (including empty arrays and objects) is true.
	pub fn is_truthy(&self) -> bool {
		match &self.0 {
			Value::Null => false,
			Value::Bool(b) => *b,
			Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
			Value::String(s) => !s.is_empty(),
			Value::Array(_) | Value::Object(_) => true,
		}
	}

	/// True for the `null` identifier, which stands for a missing id.
	pub fn is_null(&self) -> bool {
		self.0.is_null()
	}

	/// Lookup key that keeps `"1"` and `1` apart but treats `1` and `1.0`
	/// as the same id.
	pub fn key(&self) -> String {
		match &self.0 {
			Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
			other => other.to_string(),
		}
	}
}

/// Numbers compare by value, so `1 == 1.0`; everything else structurally.
impl PartialEq for NodeId {
	fn eq(&self, other: &Self) -> bool {
		match (&self.0, &other.0) {
			(Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
			(a, b) => a == b,
		}
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.0 {
			Value::String(s) => f.write_str(s),
			other => write!(f, "{other}"),
		}
	}
}

impl From<&str> for NodeId {
	fn from(value: &str) -> Self {
		Self(Value::from(value))
	}
}

impl From<String> for NodeId {
	fn from(value: String) -> Self {
		Self(Value::from(value))
	}
}

impl From<i64> for NodeId {
	fn from(value: i64) -> Self {
		Self(Value::from(value))
	}
}
