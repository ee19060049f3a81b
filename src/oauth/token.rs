//! Authorization code exchange.
//!
//! The authorization code (or refresh token) authenticates the exchange, so no client
//! identifier is injected here; the caller's parameters travel as the body untouched.

// self
use crate::{
	_prelude::*,
	config::BaseAddress,
	http::{RequestExecutor, RequestExecutorExt},
	model::TokenResponse,
	oauth::{OAuthClient, TOKEN_PATH},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	params::RequestParams,
	request::{ApiRequest, Method, RequestOptions},
};

/// Grant types accepted by the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Exchange an authorization code returned to the redirect URI.
	AuthorizationCode,
	/// Exchange a refresh token for a fresh access token.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}

	/// Name of the parameter carrying the grant's credential.
	pub fn credential_param(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

impl RequestParams {
	/// Token exchange body for `grant` carrying `credential`.
	pub fn for_grant(grant: GrantType, credential: impl Into<String>) -> Self {
		Self::new()
			.with("grant_type", grant.as_str())
			.with(grant.credential_param(), credential.into())
	}

	/// Token exchange body for an authorization code.
	pub fn authorization_code(code: impl Into<String>) -> Self {
		Self::for_grant(GrantType::AuthorizationCode, code)
	}

	/// Token exchange body for a refresh token.
	pub fn refresh_token(refresh_token: impl Into<String>) -> Self {
		Self::for_grant(GrantType::RefreshToken, refresh_token)
	}
}

impl<E> OAuthClient<E>
where
	E: ?Sized + RequestExecutor,
{
	/// Exchanges an authorization code for the connected account's credentials.
	///
	/// Issues `POST /oauth/token` against the connect base with `params` as the body.
	/// Executor failures are returned unchanged.
	pub async fn token(
		&self,
		params: &RequestParams,
		options: Option<&RequestOptions>,
	) -> Result<TokenResponse> {
		const KIND: OperationKind = OperationKind::Token;

		let span = OperationSpan::new(KIND, "token");

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let request =
			ApiRequest::new(BaseAddress::Connect, Method::Post, TOKEN_PATH, params.clone())
				.with_options(options);
		let result = span.instrument(self.executor.request::<TokenResponse>(request)).await;

		obs::record_result(&span, KIND, &result);

		result
	}
}
