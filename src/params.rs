//! Request parameter maps passed to the OAuth operations.
//!
//! Keys are kept in a [`BTreeMap`], so flattened query strings and form bodies come out in a
//! stable, sorted order regardless of insertion order.

// self
use crate::_prelude::*;

/// A single parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	/// Explicit null, encoded as an empty value (`key=`).
	Null,
	/// Boolean, encoded as `true`/`false`.
	Bool(bool),
	/// Signed integer.
	Integer(i64),
	/// Floating point number; must be finite to be encoded.
	Float(f64),
	/// Plain string.
	String(String),
	/// Array, flattened as `key[0]`, `key[1]`, ...
	List(Vec<ParamValue>),
	/// Nested map, flattened as `key[child]`.
	Map(BTreeMap<String, ParamValue>),
}
impl ParamValue {
	/// Returns the string payload, if this is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Whether this is [`ParamValue::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}
impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}
impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}
impl From<&String> for ParamValue {
	fn from(value: &String) -> Self {
		Self::String(value.clone())
	}
}
impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl From<i32> for ParamValue {
	fn from(value: i32) -> Self {
		Self::Integer(value.into())
	}
}
impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}
impl From<u32> for ParamValue {
	fn from(value: u32) -> Self {
		Self::Integer(value.into())
	}
}
impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}
impl<T> From<Option<T>> for ParamValue
where
	T: Into<ParamValue>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}
impl<T> From<Vec<T>> for ParamValue
where
	T: Into<ParamValue>,
{
	fn from(values: Vec<T>) -> Self {
		Self::List(values.into_iter().map(Into::into).collect())
	}
}
impl From<BTreeMap<String, ParamValue>> for ParamValue {
	fn from(value: BTreeMap<String, ParamValue>) -> Self {
		Self::Map(value)
	}
}
impl From<RequestParams> for ParamValue {
	fn from(value: RequestParams) -> Self {
		Self::Map(value.0)
	}
}

/// Parameter map handed to the OAuth operations and carried as a request body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams(BTreeMap<String, ParamValue>);
impl RequestParams {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.insert(key, value);

		self
	}

	/// Inserts a value, returning the previous one.
	pub fn insert(
		&mut self,
		key: impl Into<String>,
		value: impl Into<ParamValue>,
	) -> Option<ParamValue> {
		self.0.insert(key.into(), value.into())
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.0.get(key)
	}

	/// Returns the value stored under `key` when it is a string.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(ParamValue::as_str)
	}

	/// Checks whether `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Removes and returns the value stored under `key`.
	pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
		self.0.remove(key)
	}

	/// Number of top-level entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when no entries are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over top-level entries in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}
}
impl<K, V> FromIterator<(K, V)> for RequestParams
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}
impl From<BTreeMap<String, ParamValue>> for RequestParams {
	fn from(value: BTreeMap<String, ParamValue>) -> Self {
		Self(value)
	}
}
