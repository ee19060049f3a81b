//! Crate-level error types shared by the OAuth operations and request executors.

// self
use crate::{_prelude::*, config::BaseAddress};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const MISSING_CLIENT_ID: &str = "No client_id provided. (HINT: set a fallback client_id with \
	`OAuthConfigBuilder::client_id(<CLIENT-ID>)`. You can find your client_ids in the platform \
	dashboard's application settings after registering your account as a platform. See the \
	connect documentation for details, or email the platform support team if you have any \
	questions.)";

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// No client identifier could be resolved; fix the configuration, do not retry.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Request parameters cannot be encoded.
	#[error(transparent)]
	InvalidRequest(#[from] InvalidRequestError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Temporary upstream failure; retry with backoff.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Remote service rejected the OAuth request.
	#[error(transparent)]
	OAuth(#[from] OAuthError),

	/// Remote service returned a non-OAuth failure response.
	#[error("Service returned HTTP {status}: {message}.")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Service-supplied message or a preview of the response body.
		message: String,
	},
}
impl Error {
	/// Returns `true` when repeating the same call may succeed.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::Transient(_) | Self::Transport(_))
	}
}

/// Raised when none of the client identifier sources yields a value.
///
/// The message carries remediation steps and is meant to be shown to the end user verbatim.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct AuthenticationError {
	/// Remediation text.
	pub message: String,
}
impl AuthenticationError {
	pub(crate) fn missing_client_id() -> Self {
		Self { message: MISSING_CLIENT_ID.into() }
	}
}

/// Parameters that cannot be turned into a well-formed request.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum InvalidRequestError {
	/// A parameter key (top-level or nested) was empty.
	#[error("Parameter keys cannot be empty (under `{parent}`).")]
	EmptyKey {
		/// Flattened key of the enclosing map, empty at the top level.
		parent: String,
	},
	/// Floats must be finite to be form encoded.
	#[error("Parameter `{key}` holds a non-finite number.")]
	NonFiniteNumber {
		/// Flattened key of the offending value.
		key: String,
	},
	/// The `client_id` parameter must be a string.
	#[error("Parameter `client_id` must be a string.")]
	NonStringClientId,
}

/// Configuration failures surfaced while building or dispatching requests.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// No base URL is configured for the requested endpoint family.
	#[error("No base URL is configured for the {kind} endpoint family.")]
	MissingBaseAddress {
		/// Endpoint family that was requested.
		kind: BaseAddress,
	},
	/// Joining a base URL with a request path produced an invalid URL.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Temporary failure variants (safe to retry).
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Service returned a throttling or server-side failure.
	#[error("Service returned a temporary failure: {message}.")]
	Endpoint {
		/// Summary of the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// A success response carried a body that could not be decoded.
	#[error("Service returned a malformed response body.")]
	ResponseParse {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code.
		status: u16,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// OAuth error codes returned by the connect endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OAuthErrorCode {
	/// Client authentication failed.
	InvalidClient,
	/// Authorization code or refresh token is invalid, expired, or already used.
	InvalidGrant,
	/// Request is missing a parameter or is otherwise malformed.
	InvalidRequest,
	/// Requested scope is invalid or unknown.
	InvalidScope,
	/// Grant type is not supported.
	UnsupportedGrantType,
	/// Response type is not supported.
	UnsupportedResponseType,
	/// Any other code, kept verbatim.
	Other(String),
}
impl OAuthErrorCode {
	/// Returns the wire identifier.
	pub fn as_str(&self) -> &str {
		match self {
			Self::InvalidClient => "invalid_client",
			Self::InvalidGrant => "invalid_grant",
			Self::InvalidRequest => "invalid_request",
			Self::InvalidScope => "invalid_scope",
			Self::UnsupportedGrantType => "unsupported_grant_type",
			Self::UnsupportedResponseType => "unsupported_response_type",
			Self::Other(code) => code,
		}
	}
}
impl From<&str> for OAuthErrorCode {
	fn from(value: &str) -> Self {
		match value {
			"invalid_client" => Self::InvalidClient,
			"invalid_grant" => Self::InvalidGrant,
			"invalid_request" => Self::InvalidRequest,
			"invalid_scope" => Self::InvalidScope,
			"unsupported_grant_type" => Self::UnsupportedGrantType,
			"unsupported_response_type" => Self::UnsupportedResponseType,
			other => Self::Other(other.to_owned()),
		}
	}
}
impl Display for OAuthErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// OAuth error response decoded from the service.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Service returned an OAuth error ({code}): {}.", .description.as_deref().unwrap_or("no description"))]
pub struct OAuthError {
	/// Classified `error` field.
	pub code: OAuthErrorCode,
	/// Optional `error_description` field.
	pub description: Option<String>,
	/// HTTP status code.
	pub status: u16,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn authentication_error_displays_remediation_verbatim() {
		let err = Error::from(AuthenticationError::missing_client_id());

		assert_eq!(err.to_string(), MISSING_CLIENT_ID);
		assert!(err.to_string().starts_with("No client_id provided."));
		assert!(!err.is_retryable());
	}

	#[test]
	fn oauth_codes_round_trip_through_wire_names() {
		for code in ["invalid_client", "invalid_grant", "unsupported_response_type", "custom"] {
			assert_eq!(OAuthErrorCode::from(code).as_str(), code);
		}

		assert_eq!(OAuthErrorCode::from("custom"), OAuthErrorCode::Other("custom".into()));
	}

	#[test]
	fn only_transient_and_transport_errors_are_retryable() {
		let transient = Error::from(TransientError::Endpoint {
			message: "busy".into(),
			status: Some(503),
			retry_after: None,
		});
		let transport = Error::from(TransportError::Io(std::io::Error::other("reset")));
		let oauth = Error::from(OAuthError {
			code: OAuthErrorCode::InvalidGrant,
			description: None,
			status: 400,
		});

		assert!(transient.is_retryable());
		assert!(transport.is_retryable());
		assert!(!oauth.is_retryable());
		assert!(!Error::from(InvalidRequestError::NonStringClientId).is_retryable());
	}
}
