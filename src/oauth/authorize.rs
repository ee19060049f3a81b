//! Authorization URL construction. No network call is made.

// self
use crate::{
	_prelude::*,
	config::BaseAddress,
	form,
	http::RequestExecutor,
	oauth::{
		AUTHORIZE_PATH, CLIENT_ID_PARAM, DEFAULT_RESPONSE_TYPE, OAuthClient, RESPONSE_TYPE_PARAM,
	},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	params::{ParamValue, RequestParams},
	request::RequestOptions,
};

impl<E> OAuthClient<E>
where
	E: ?Sized + RequestExecutor,
{
	/// Builds the URL of the connect authorization form.
	///
	/// The resolved client identifier is written back into `params` under `client_id`, and
	/// `response_type` defaults to `code` when absent; the caller sees both changes. The
	/// query string is form encoded with bracket notation for nested values.
	pub fn authorize_url(
		&self,
		params: &mut RequestParams,
		options: Option<&RequestOptions>,
	) -> Result<Url> {
		const KIND: OperationKind = OperationKind::AuthorizeUrl;

		let span = OperationSpan::new(KIND, "authorize_url");

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let result = {
			let _guard = span.enter();

			self.build_authorize_url(params, options)
		};

		obs::record_result(&span, KIND, &result);

		result
	}

	fn build_authorize_url(
		&self,
		params: &mut RequestParams,
		options: Option<&RequestOptions>,
	) -> Result<Url> {
		let mut url = self.config.base_urls.endpoint(BaseAddress::Connect, AUTHORIZE_PATH)?;
		let client_id = self.resolve_client_id(params, options)?;

		params.insert(CLIENT_ID_PARAM, String::from(client_id));

		if params.get(RESPONSE_TYPE_PARAM).is_none_or(ParamValue::is_null) {
			params.insert(RESPONSE_TYPE_PARAM, DEFAULT_RESPONSE_TYPE);
		}

		let query = form::encode_query(params)?;

		url.set_query(Some(&query));

		Ok(url)
	}
}
