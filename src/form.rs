//! Form encoding for query strings and `application/x-www-form-urlencoded` bodies.
//!
//! Nested values are flattened with bracket notation (`user[email]`, `scopes[0]`). Reserved
//! characters are percent-escaped and spaces become `%20`, never `+`. Brackets introduced by
//! flattening stay literal so the service can rebuild the structure.

// crates.io
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	error::InvalidRequestError,
	params::{ParamValue, RequestParams},
};

/// Flattens `params` into ordered `(key, value)` pairs without percent-encoding them.
///
/// Nulls, empty lists, and empty maps produce a single pair with an empty value so callers can
/// clear a field remotely.
pub fn flatten(params: &RequestParams) -> Result<Vec<(String, String)>, InvalidRequestError> {
	let mut pairs = Vec::with_capacity(params.len());

	for (key, value) in params.iter() {
		if key.is_empty() {
			return Err(InvalidRequestError::EmptyKey { parent: String::new() });
		}

		flatten_value(key.to_owned(), value, &mut pairs)?;
	}

	Ok(pairs)
}

/// Encodes `params` into a query string (no leading `?`).
pub fn encode_query(params: &RequestParams) -> Result<String, InvalidRequestError> {
	let encoded = flatten(params)?
		.into_iter()
		.map(|(key, value)| format!("{}={}", encode_key(&key), encode_component(&value)))
		.collect::<Vec<_>>();

	Ok(encoded.join("&"))
}

/// Decodes a query string or form body into `(key, value)` pairs, keeping bracket keys as-is.
///
/// Accepts both `%20` and `+` for spaces.
pub fn decode_query(query: &str) -> Vec<(String, String)> {
	form_urlencoded::parse(query.trim_start_matches('?').as_bytes()).into_owned().collect()
}

fn flatten_value(
	key: String,
	value: &ParamValue,
	pairs: &mut Vec<(String, String)>,
) -> Result<(), InvalidRequestError> {
	match value {
		ParamValue::Null => pairs.push((key, String::new())),
		ParamValue::Bool(value) => pairs.push((key, value.to_string())),
		ParamValue::Integer(value) => pairs.push((key, value.to_string())),
		ParamValue::Float(value) => {
			if !value.is_finite() {
				return Err(InvalidRequestError::NonFiniteNumber { key });
			}

			pairs.push((key, value.to_string()));
		},
		ParamValue::String(value) => pairs.push((key, value.clone())),
		ParamValue::List(values) if values.is_empty() => pairs.push((key, String::new())),
		ParamValue::List(values) =>
			for (idx, value) in values.iter().enumerate() {
				flatten_value(format!("{key}[{idx}]"), value, pairs)?;
			},
		ParamValue::Map(map) if map.is_empty() => pairs.push((key, String::new())),
		ParamValue::Map(map) =>
			for (child, value) in map {
				if child.is_empty() {
					return Err(InvalidRequestError::EmptyKey { parent: key });
				}

				flatten_value(format!("{key}[{child}]"), value, pairs)?;
			},
	}

	Ok(())
}

fn encode_component(raw: &str) -> String {
	// `+` in the input is already escaped as `%2B`, so only spaces remain as `+`.
	form_urlencoded::byte_serialize(raw.as_bytes()).collect::<String>().replace('+', "%20")
}

fn encode_key(raw: &str) -> String {
	encode_component(raw).replace("%5B", "[").replace("%5D", "]")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn encodes_reserved_characters_without_plus() {
		let params = RequestParams::new()
			.with("redirect_uri", "https://app.example.com/cb?x=1&y=2")
			.with("state", "a b+c");

		assert_eq!(
			encode_query(&params).expect("Query should encode."),
			"redirect_uri=https%3A%2F%2Fapp.example.com%2Fcb%3Fx%3D1%26y%3D2&state=a%20b%2Bc"
		);
	}

	#[test]
	fn flattens_nested_values_with_brackets() {
		let mut profile = BTreeMap::new();

		profile.insert("email".to_owned(), ParamValue::from("a@b.c"));
		profile.insert("tags".to_owned(), ParamValue::from(vec!["x", "y"]));

		let params = RequestParams::new().with("user", profile).with("limit", 3);

		assert_eq!(
			encode_query(&params).expect("Query should encode."),
			"limit=3&user[email]=a%40b.c&user[tags][0]=x&user[tags][1]=y"
		);
	}

	#[test]
	fn empty_collections_encode_as_empty_values() {
		let params = RequestParams::new()
			.with("metadata", BTreeMap::<String, ParamValue>::new())
			.with("scopes", Vec::<String>::new());

		assert_eq!(encode_query(&params).expect("Query should encode."), "metadata=&scopes=");
	}

	#[test]
	fn nulls_encode_as_empty_values() {
		let mut profile = BTreeMap::new();

		profile.insert("url".to_owned(), ParamValue::Null);

		let params = RequestParams::new().with("state", ParamValue::Null).with("user", profile);

		assert_eq!(encode_query(&params).expect("Query should encode."), "state=&user[url]=");
	}

	#[test]
	fn rejects_unencodable_values() {
		let nan = RequestParams::new().with("ratio", f64::NAN);

		assert_eq!(
			encode_query(&nan),
			Err(InvalidRequestError::NonFiniteNumber { key: "ratio".into() })
		);

		let mut nested = BTreeMap::new();

		nested.insert(String::new(), ParamValue::from("x"));

		let empty_child = RequestParams::new().with("user", nested);

		assert_eq!(
			encode_query(&empty_child),
			Err(InvalidRequestError::EmptyKey { parent: "user".into() })
		);
		assert!(encode_query(&RequestParams::new().with("", "x")).is_err());
	}

	#[test]
	fn decoding_restores_flattened_pairs() {
		let params = RequestParams::new()
			.with("scopes", vec!["read write", "admin&co"])
			.with("client_id", "ca_123")
			.with("ratio", 0.5);
		let encoded = encode_query(&params).expect("Query should encode.");

		assert_eq!(decode_query(&encoded), flatten(&params).expect("Params should flatten."));
		assert_eq!(decode_query("?a=b+c"), vec![("a".to_owned(), "b c".to_owned())]);
	}
}
