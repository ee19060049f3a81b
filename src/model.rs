//! Response records decoded from the connect endpoints.
//!
//! The OAuth operations pass these through untouched. Fields the crate does not model are kept
//! in `extra`.

// self
use crate::{
	_prelude::*,
	auth::{AccountId, TokenSecret},
};

/// Credentials returned by the token endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Access token for the connected account.
	pub access_token: Option<TokenSecret>,
	/// Refresh token, when the grant issues one.
	pub refresh_token: Option<TokenSecret>,
	/// Token type (usually `bearer`).
	pub token_type: Option<String>,
	/// Granted scope.
	pub scope: Option<String>,
	/// Whether the credentials are for live (as opposed to test) mode.
	pub livemode: Option<bool>,
	/// Connected account identifier.
	#[serde(alias = "stripe_user_id")]
	pub account_id: Option<AccountId>,
	/// Publishable key of the connected account.
	#[serde(alias = "stripe_publishable_key")]
	pub publishable_key: Option<String>,
	/// Fields not modeled above.
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Result of disconnecting an account from the platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeauthorizedAccount {
	/// Identifier of the account that was disconnected.
	#[serde(alias = "stripe_user_id")]
	pub account_id: AccountId,
	/// Fields not modeled above.
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}
