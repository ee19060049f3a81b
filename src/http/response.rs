// self
use crate::{
	_prelude::*,
	error::{OAuthError, OAuthErrorCode, TransientError},
};

const BODY_PREVIEW_LIMIT: usize = 256;

/// Raw response captured by an executor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response with a raw body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, retry_after: None, body: body.into() }
	}

	/// Creates a response whose body is the serialized `value`.
	pub fn json(status: u16, value: &serde_json::Value) -> Self {
		Self::new(status, value.to_string())
	}

	/// Attaches a Retry-After hint.
	pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
		self.retry_after = Some(retry_after);

		self
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

#[derive(Deserialize)]
struct OAuthErrorBody {
	error: String,
	error_description: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
	error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
	message: Option<String>,
}

/// Decodes a success body into `T`, or classifies the failure.
pub(crate) fn interpret<T>(response: ApiResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	if !response.is_success() {
		return Err(classify_failure(response));
	}

	let mut de = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| TransientError::ResponseParse { source, status: response.status }.into())
}

fn classify_failure(response: ApiResponse) -> Error {
	let ApiResponse { status, retry_after, body } = response;

	if let Ok(oauth) = serde_json::from_slice::<OAuthErrorBody>(&body) {
		return OAuthError {
			code: OAuthErrorCode::from(oauth.error.as_str()),
			description: oauth.error_description,
			status,
		}
		.into();
	}

	let message = serde_json::from_slice::<ApiErrorBody>(&body)
		.ok()
		.and_then(|parsed| parsed.error.message)
		.unwrap_or_else(|| body_preview(&body));

	if status == 429 || status >= 500 {
		return TransientError::Endpoint { message, status: Some(status), retry_after }.into();
	}

	Error::Api { status, message }
}

fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);
	let trimmed = text.trim();

	if trimmed.is_empty() {
		return "empty response body".into();
	}

	trimmed.chars().take(BODY_PREVIEW_LIMIT).collect()
}
