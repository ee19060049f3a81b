//! OAuth connect operations: authorize URLs, token exchanges, and deauthorization.
//!
//! [`OAuthClient`] is stateless across calls. Each operation is a function of its arguments,
//! the [`OAuthConfig`] supplied at construction, and the injected [`RequestExecutor`].

mod authorize;
mod client_id;
mod deauthorize;
mod token;

pub use token::*;

// self
use crate::{_prelude::*, config::OAuthConfig, http::RequestExecutor};
#[cfg(feature = "reqwest")] use crate::http::ReqwestExecutor;

/// Parameter key carrying the client identifier.
pub const CLIENT_ID_PARAM: &str = "client_id";
/// Parameter key carrying the requested response type.
pub const RESPONSE_TYPE_PARAM: &str = "response_type";
/// Response type used when the caller does not pick one.
pub const DEFAULT_RESPONSE_TYPE: &str = "code";
/// Path of the authorization form, relative to the connect base.
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";
/// Path of the token endpoint, relative to the connect base.
pub const TOKEN_PATH: &str = "/oauth/token";
/// Path of the deauthorization endpoint, relative to the connect base.
pub const DEAUTHORIZE_PATH: &str = "/oauth/deauthorize";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest executor.
pub type ReqwestOAuthClient = OAuthClient<ReqwestExecutor>;

/// Façade over the connect OAuth endpoints.
///
/// The executor is shared behind an [`Arc`] and may be any [`RequestExecutor`]: the live
/// [`ReqwestExecutor`](crate::http::ReqwestExecutor), a
/// [`RecordingExecutor`](crate::http::RecordingExecutor), or a custom transport. The client is
/// `Send + Sync` and safe to call concurrently.
pub struct OAuthClient<E>
where
	E: ?Sized + RequestExecutor,
{
	/// Executor used for every outbound request.
	pub executor: Arc<E>,
	/// Configuration read on every call.
	pub config: OAuthConfig,
}
impl<E> OAuthClient<E>
where
	E: ?Sized + RequestExecutor,
{
	/// Creates a client that dispatches through the caller-provided executor.
	pub fn with_executor(config: OAuthConfig, executor: impl Into<Arc<E>>) -> Self {
		Self { executor: executor.into(), config }
	}
}
#[cfg(feature = "reqwest")]
impl OAuthClient<ReqwestExecutor> {
	/// Creates a client backed by a live reqwest executor for `config`.
	pub fn new(config: OAuthConfig) -> Result<Self> {
		let executor = ReqwestExecutor::new(&config)?;

		Ok(Self::with_executor(config, executor))
	}
}
impl<E> Clone for OAuthClient<E>
where
	E: ?Sized + RequestExecutor,
{
	fn clone(&self) -> Self {
		Self { executor: self.executor.clone(), config: self.config.clone() }
	}
}
impl<E> Debug for OAuthClient<E>
where
	E: ?Sized + RequestExecutor,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthClient")
			.field("client_id", &self.config.client_id)
			.field("base_urls", &self.config.base_urls)
			.field("api_key_set", &self.config.api_key.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::RecordingExecutor;

	pub(super) fn config(fallback: Option<&str>) -> OAuthConfig {
		let mut builder = OAuthConfig::builder().connect_base(
			Url::parse("https://connect.example.com").expect("Connect base should parse."),
		);

		if let Some(client_id) = fallback {
			builder = builder.client_id(client_id);
		}

		builder.build().expect("Test configuration should build.")
	}

	pub(super) fn client(
		fallback: Option<&str>,
		executor: &RecordingExecutor,
	) -> OAuthClient<RecordingExecutor> {
		OAuthClient::with_executor(config(fallback), executor.clone())
	}

	#[test]
	fn debug_output_hides_api_key() {
		let mut config = config(Some("ca_123"));

		config.api_key = Some("sk_live_hidden".into());

		let client =
			OAuthClient::<RecordingExecutor>::with_executor(config, RecordingExecutor::new());
		let rendered = format!("{client:?}");

		assert!(rendered.contains("api_key_set: true"));
		assert!(!rendered.contains("sk_live_hidden"));
	}

	#[test]
	fn dyn_executors_are_supported() {
		let executor: Arc<dyn RequestExecutor> = Arc::new(RecordingExecutor::new());
		let client: OAuthClient<dyn RequestExecutor> =
			OAuthClient::with_executor(config(Some("ca_123")), executor);
		let resolved = client
			.resolve_client_id(&Default::default(), None)
			.expect("Fallback should resolve.");

		assert_eq!(resolved.as_str(), "ca_123");
	}
}
