// self
use crate::{
	_prelude::*,
	auth::{ClientId, IdentifierError, TokenSecret},
	config::{BaseUrls, OAuthConfig},
};

/// Errors raised while constructing or validating configurations.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum OAuthConfigError {
	/// The connect base URL is mandatory.
	#[error("Missing connect base URL.")]
	MissingConnectBase,
	/// Base URLs must use HTTPS unless they point at a loopback host.
	#[error("The {base} base URL must use HTTPS: {url}.")]
	InsecureBase {
		/// Which base failed validation.
		base: &'static str,
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URLs cannot carry a query or fragment.
	#[error("The {base} base URL must not carry a query or fragment: {url}.")]
	BaseWithQuery {
		/// Which base failed validation.
		base: &'static str,
		/// Base URL that failed validation.
		url: String,
	},
	/// The fallback client identifier is malformed.
	#[error("Fallback client identifier is invalid: {0}")]
	InvalidClientId(#[from] IdentifierError),
}

/// Builder for [`OAuthConfig`] values.
#[derive(Debug, Default)]
pub struct OAuthConfigBuilder {
	/// Connect base URL.
	pub connect_base: Option<Url>,
	/// Optional primary API base URL.
	pub api_base: Option<Url>,
	/// Raw fallback client identifier.
	pub client_id: Option<String>,
	/// Default API key.
	pub api_key: Option<TokenSecret>,
}
impl OAuthConfigBuilder {
	/// Sets the connect base URL.
	pub fn connect_base(mut self, url: Url) -> Self {
		self.connect_base = Some(url);

		self
	}

	/// Sets the primary API base URL.
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Sets the fallback client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the default API key.
	pub fn api_key(mut self, api_key: impl Into<TokenSecret>) -> Self {
		self.api_key = Some(api_key.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<OAuthConfig, OAuthConfigError> {
		let connect = self.connect_base.ok_or(OAuthConfigError::MissingConnectBase)?;
		// An empty fallback means "unset" so the resolver can fail with remediation text.
		let client_id = self
			.client_id
			.filter(|value| !value.is_empty())
			.map(ClientId::new)
			.transpose()?;
		let config = OAuthConfig {
			client_id,
			api_key: self.api_key,
			base_urls: BaseUrls { connect, api: self.api_base },
		};

		config.validate()?;

		Ok(config)
	}
}

impl OAuthConfig {
	/// Validates invariants for configurations that bypassed the builder (e.g. deserialized).
	pub fn validate(&self) -> Result<(), OAuthConfigError> {
		validate_base("connect", &self.base_urls.connect)?;

		if let Some(api) = self.base_urls.api.as_ref() {
			validate_base("api", api)?;
		}

		Ok(())
	}
}

fn validate_base(name: &'static str, url: &Url) -> Result<(), OAuthConfigError> {
	if url.query().is_some() || url.fragment().is_some() {
		return Err(OAuthConfigError::BaseWithQuery { base: name, url: url.to_string() });
	}

	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(OAuthConfigError::InsecureBase { base: name, url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
		Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	#[test]
	fn builds_with_fallback_client_id() {
		let config = OAuthConfig::builder()
			.connect_base(url("https://connect.example.com"))
			.client_id("ca_123")
			.api_key("sk_test_123")
			.build()
			.expect("Configuration should build.");

		assert_eq!(config.client_id.as_deref(), Some("ca_123"));
		assert_eq!(config.api_key.as_ref().map(TokenSecret::expose), Some("sk_test_123"));
	}

	#[test]
	fn empty_fallback_is_treated_as_unset() {
		let config = OAuthConfig::builder()
			.connect_base(url("https://connect.example.com"))
			.client_id("")
			.build()
			.expect("Configuration should build.");

		assert!(config.client_id.is_none());
	}

	#[test]
	fn rejects_insecure_and_malformed_bases() {
		assert_eq!(OAuthConfig::builder().build(), Err(OAuthConfigError::MissingConnectBase));

		let err = OAuthConfig::builder()
			.connect_base(url("http://connect.example.com"))
			.build()
			.expect_err("Plain HTTP should be rejected.");

		assert!(matches!(err, OAuthConfigError::InsecureBase { base: "connect", .. }));

		let err = OAuthConfig::builder()
			.connect_base(url("https://connect.example.com"))
			.api_base(url("https://api.example.com/?v=1"))
			.build()
			.expect_err("Bases with a query should be rejected.");

		assert!(matches!(err, OAuthConfigError::BaseWithQuery { base: "api", .. }));

		let err = OAuthConfig::builder()
			.connect_base(url("https://connect.example.com"))
			.client_id("ca 123")
			.build()
			.expect_err("Whitespace in the fallback client id should be rejected.");

		assert!(matches!(err, OAuthConfigError::InvalidClientId(_)));
	}

	#[test]
	fn allows_plain_http_on_loopback() {
		for base in ["http://127.0.0.1:8080", "http://localhost:3000", "http://[::1]:9000"] {
			OAuthConfig::builder()
				.connect_base(url(base))
				.build()
				.expect("Loopback bases should be accepted over HTTP.");
		}
	}
}
