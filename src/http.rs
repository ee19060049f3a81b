//! Request execution for the OAuth operations.
//!
//! [`RequestExecutor`] is the crate's only dependency on an HTTP stack. An executor turns an
//! [`ApiRequest`] into a raw [`ApiResponse`] (status, retry hint, body) or a transport failure;
//! [`RequestExecutorExt::request`] then classifies the response and decodes it into the
//! expected type. Classification lives on the crate side, so swapping the live
//! [`ReqwestExecutor`] for a [`RecordingExecutor`] never changes how responses are interpreted.

mod recording;
mod response;

pub use recording::*;
pub use response::*;

#[cfg(feature = "reqwest")] use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, request::ApiRequest};
#[cfg(feature = "reqwest")]
use crate::{
	auth::TokenSecret,
	config::{BaseUrls, OAuthConfig},
	error::{ConfigError, TransientError, TransportError},
	form,
	request::Method,
};

/// Boxed future returned by executors.
pub type ExecutorFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Executes fully formed requests against the remote service.
///
/// Implementations must be `Send + Sync + 'static` so one instance can be shared across
/// clients and tasks, and the returned future must be `Send`. Non-success HTTP statuses are
/// not errors at this layer: return them as an [`ApiResponse`] and let the crate classify them.
pub trait RequestExecutor
where
	Self: 'static + Send + Sync,
{
	/// Dispatches `request` and returns the raw response.
	fn execute(&self, request: ApiRequest) -> ExecutorFuture<'_, ApiResponse>;
}

/// Typed dispatch shared by every [`RequestExecutor`].
pub trait RequestExecutorExt: RequestExecutor {
	/// Dispatches `request` and decodes a success body into `T`.
	fn request<T>(&self, request: ApiRequest) -> ExecutorFuture<'_, T>
	where
		T: 'static + Send + DeserializeOwned;
}
impl<E> RequestExecutorExt for E
where
	E: ?Sized + RequestExecutor,
{
	fn request<T>(&self, request: ApiRequest) -> ExecutorFuture<'_, T>
	where
		T: 'static + Send + DeserializeOwned,
	{
		Box::pin(async move {
			let response = self.execute(request).await?;

			response::interpret(response)
		})
	}
}

/// Live executor backed by [`ReqwestClient`].
///
/// Redirects are not followed; OAuth endpoints answer directly. Any custom client passed to
/// [`ReqwestExecutor::with_client`] should be configured the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestExecutor {
	client: ReqwestClient,
	base_urls: BaseUrls,
	api_key: Option<TokenSecret>,
}
#[cfg(feature = "reqwest")]
impl ReqwestExecutor {
	/// Builds an executor with a redirect-free client for the configured base URLs.
	pub fn new(config: &OAuthConfig) -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self::with_client(client, config))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient, config: &OAuthConfig) -> Self {
		Self { client, base_urls: config.base_urls.clone(), api_key: config.api_key.clone() }
	}

	async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse> {
		let mut url = self.base_urls.endpoint(request.base, &request.path)?;
		let encoded = form::encode_query(&request.params)?;
		let mut builder = match request.method {
			Method::Post => self
				.client
				.post(url)
				.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
				.body(encoded),
			Method::Get | Method::Delete => {
				if !encoded.is_empty() {
					url.set_query(Some(&encoded));
				}

				let method = match request.method {
					Method::Delete => reqwest::Method::DELETE,
					_ => reqwest::Method::GET,
				};

				self.client.request(method, url)
			},
		}
		.header(ACCEPT, "application/json");

		if let Some(key) = request.options.api_key.as_ref().or(self.api_key.as_ref()) {
			builder = builder.bearer_auth(key.expose());
		}
		if let Some(key) = request.options.idempotency_key.as_deref() {
			builder = builder.header("Idempotency-Key", key);
		}

		let response = builder.send().await.map_err(map_reqwest_error)?;
		let status = response.status().as_u16();
		let retry_after = parse_retry_after(response.headers());
		let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

		Ok(ApiResponse { status, retry_after, body })
	}
}
#[cfg(feature = "reqwest")]
impl RequestExecutor for ReqwestExecutor {
	fn execute(&self, request: ApiRequest) -> ExecutorFuture<'_, ApiResponse> {
		Box::pin(self.dispatch(request))
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransientError::Endpoint {
			message: "Request timed out while calling the service".into(),
			status: err.status().map(|code| code.as_u16()),
			retry_after: None,
		}
		.into();
	}

	TransportError::from(err).into()
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		// Out-of-range hints are dropped.
		return i64::try_from(secs).ok().map(Duration::seconds);
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use reqwest::header::HeaderValue;
	// self
	use super::*;

	#[test]
	fn retry_after_accepts_delta_seconds() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("30"));

		assert_eq!(parse_retry_after(&headers), Some(Duration::seconds(30)));
	}

	#[test]
	fn retry_after_drops_out_of_range_seconds() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("18446744073709551615"));

		assert_eq!(parse_retry_after(&headers), None);

		headers.insert(RETRY_AFTER, HeaderValue::from_static("9223372036854775807"));

		assert_eq!(parse_retry_after(&headers), Some(Duration::seconds(i64::MAX)));
	}

	#[test]
	fn retry_after_accepts_future_dates() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("Fri, 01 Jan 2100 00:00:00 +0000"));

		let delay = parse_retry_after(&headers).expect("Future dates should yield a delay.");

		assert!(delay.is_positive());
		assert!(delay > Duration::days(365));
	}

	#[test]
	fn retry_after_ignores_past_dates_and_garbage() {
		let past = "Wed, 21 Oct 2015 07:28:00 +0000";
		let mut headers = HeaderMap::new();

		assert!(OffsetDateTime::parse(past, &Rfc2822).is_ok());

		headers.insert(RETRY_AFTER, HeaderValue::from_static(past));

		assert_eq!(parse_retry_after(&headers), None);

		headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));

		assert_eq!(parse_retry_after(&headers), None);
		assert_eq!(parse_retry_after(&HeaderMap::new()), None);
	}
}
