//! Request descriptions handed to a [`RequestExecutor`](crate::http::RequestExecutor).

// self
use crate::{_prelude::*, auth::TokenSecret, config::BaseAddress, params::RequestParams};

/// HTTP methods used by the executor layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`, parameters travel in the query string.
	Get,
	/// `POST`, parameters travel as a form body.
	Post,
	/// `DELETE`, parameters travel in the query string.
	Delete,
}
impl Method {
	/// Returns the canonical method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Per-call options. Immutable once handed to an operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
	/// Client identifier overriding the configured fallback.
	pub client_id: Option<String>,
	/// API key overriding the configured default.
	pub api_key: Option<TokenSecret>,
	/// Idempotency key forwarded by live executors.
	pub idempotency_key: Option<String>,
}
impl RequestOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the override client identifier.
	pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the override API key.
	pub fn with_api_key(mut self, api_key: impl Into<TokenSecret>) -> Self {
		self.api_key = Some(api_key.into());

		self
	}

	/// Sets the idempotency key.
	pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
		self.idempotency_key = Some(key.into());

		self
	}
}

/// Fully formed request description.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// Endpoint family whose base URL the path is resolved against.
	pub base: BaseAddress,
	/// HTTP method.
	pub method: Method,
	/// Path relative to the base URL (`/oauth/token`).
	pub path: String,
	/// Query or body parameters.
	pub params: RequestParams,
	/// Per-call options.
	pub options: RequestOptions,
}
impl ApiRequest {
	/// Creates a request without options.
	pub fn new(
		base: BaseAddress,
		method: Method,
		path: impl Into<String>,
		params: RequestParams,
	) -> Self {
		Self { base, method, path: path.into(), params, options: RequestOptions::default() }
	}

	/// Attaches per-call options, when supplied.
	pub fn with_options(mut self, options: Option<&RequestOptions>) -> Self {
		if let Some(options) = options {
			self.options = options.clone();
		}

		self
	}
}
