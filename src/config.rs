//! Client configuration passed to [`OAuthClient`](crate::oauth::OAuthClient) at construction.
//!
//! The configuration carries the fallback client identifier, the default API key used by live
//! executors, and the base URLs of each endpoint family. It is read-only once built.

/// Builder API for assembling validated configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::{ClientId, TokenSecret},
	error::ConfigError,
};

/// Endpoint families served from distinct base URLs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseAddress {
	/// Primary API root.
	Api,
	/// Connect root hosting the OAuth endpoints.
	Connect,
}
impl BaseAddress {
	/// Returns a stable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			BaseAddress::Api => "api",
			BaseAddress::Connect => "connect",
		}
	}
}
impl Display for BaseAddress {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Base URLs per endpoint family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseUrls {
	/// Connect root (`https://connect.example.com`).
	pub connect: Url,
	/// Optional primary API root.
	#[serde(default)]
	pub api: Option<Url>,
}
impl BaseUrls {
	/// Returns the base URL for `kind`.
	pub fn resolve(&self, kind: BaseAddress) -> Result<&Url, ConfigError> {
		match kind {
			BaseAddress::Connect => Ok(&self.connect),
			BaseAddress::Api => self.api.as_ref().ok_or(ConfigError::MissingBaseAddress { kind }),
		}
	}

	/// Joins the base URL for `kind` with `path`, keeping any path prefix on the base.
	pub fn endpoint(&self, kind: BaseAddress, path: &str) -> Result<Url, ConfigError> {
		let base = self.resolve(kind)?;
		let joined =
			format!("{}/{}", base.as_str().trim_end_matches('/'), path.trim_start_matches('/'));

		Url::parse(&joined).map_err(|source| ConfigError::InvalidEndpoint { source })
	}
}

/// Immutable configuration consumed by the OAuth client and live executors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthConfig {
	/// Fallback client identifier, used when neither the request options nor the parameters
	/// carry one.
	#[serde(default)]
	pub client_id: Option<ClientId>,
	/// Default API key attached by live executors.
	#[serde(default)]
	pub api_key: Option<TokenSecret>,
	/// Base URLs per endpoint family.
	pub base_urls: BaseUrls,
}
impl OAuthConfig {
	/// Creates a new builder.
	pub fn builder() -> OAuthConfigBuilder {
		OAuthConfigBuilder::default()
	}
}
