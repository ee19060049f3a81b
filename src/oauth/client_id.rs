// self
use crate::{
	_prelude::*,
	auth::ClientId,
	error::{AuthenticationError, InvalidRequestError},
	http::RequestExecutor,
	oauth::{CLIENT_ID_PARAM, OAuthClient},
	params::{ParamValue, RequestParams},
	request::RequestOptions,
};

impl<E> OAuthClient<E>
where
	E: ?Sized + RequestExecutor,
{
	/// Resolves the client identifier used by [`authorize_url`](Self::authorize_url) and
	/// [`deauthorize`](Self::deauthorize).
	///
	/// Sources, lowest to highest precedence: the configured fallback, `options.client_id`,
	/// then the `client_id` parameter. Empty or null values are skipped, and per-call values
	/// are forwarded verbatim. Fails with [`Error::Authentication`] when nothing remains.
	pub fn resolve_client_id(
		&self,
		params: &RequestParams,
		options: Option<&RequestOptions>,
	) -> Result<ClientId> {
		resolve(self.config.client_id.as_ref(), params, options)
	}
}

pub(super) fn resolve(
	fallback: Option<&ClientId>,
	params: &RequestParams,
	options: Option<&RequestOptions>,
) -> Result<ClientId> {
	let mut resolved = fallback.map(ClientId::as_str);

	if let Some(value) =
		options.and_then(|options| options.client_id.as_deref()).filter(|value| !value.is_empty())
	{
		resolved = Some(value);
	}

	match params.get(CLIENT_ID_PARAM) {
		Some(ParamValue::String(value)) if !value.is_empty() => resolved = Some(value),
		Some(ParamValue::String(_)) | Some(ParamValue::Null) | None => (),
		Some(_) => return Err(InvalidRequestError::NonStringClientId.into()),
	}

	let value = resolved.ok_or_else(AuthenticationError::missing_client_id)?;

	Ok(ClientId::from_caller(value))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn fallback(value: &str) -> ClientId {
		ClientId::new(value).expect("Fallback fixture should be valid.")
	}

	fn resolved(
		fallback: Option<&ClientId>,
		params: &RequestParams,
		options: Option<&RequestOptions>,
	) -> String {
		resolve(fallback, params, options).expect("Client id should resolve.").into()
	}

	#[test]
	fn later_sources_win() {
		let global = fallback("ca_global");
		let options = RequestOptions::new().with_client_id("ca_options");
		let params = RequestParams::new().with(CLIENT_ID_PARAM, "ca_params");

		assert_eq!(resolved(Some(&global), &RequestParams::new(), None), "ca_global");
		assert_eq!(resolved(Some(&global), &RequestParams::new(), Some(&options)), "ca_options");
		assert_eq!(resolved(Some(&global), &params, Some(&options)), "ca_params");
		assert_eq!(resolved(None, &params, None), "ca_params");
	}

	#[test]
	fn empty_values_fall_through() {
		let global = fallback("ca_global");
		let empty_options = RequestOptions::new().with_client_id("");
		let empty_params = RequestParams::new().with(CLIENT_ID_PARAM, "");

		assert_eq!(resolved(Some(&global), &empty_params, Some(&empty_options)), "ca_global");

		let options = RequestOptions::new().with_client_id("ca_options");

		assert_eq!(resolved(None, &empty_params, Some(&options)), "ca_options");
	}

	#[test]
	fn missing_everywhere_is_an_authentication_error() {
		let err = resolve(None, &RequestParams::new(), Some(&RequestOptions::new()))
			.expect_err("Resolution should fail without any source.");

		assert!(matches!(err, Error::Authentication(_)));
		assert!(err.to_string().contains("No client_id provided."));
	}

	#[test]
	fn non_string_client_ids_are_invalid_requests() {
		let numeric = RequestParams::new().with(CLIENT_ID_PARAM, 42);

		assert!(matches!(
			resolve(None, &numeric, None),
			Err(Error::InvalidRequest(InvalidRequestError::NonStringClientId))
		));
	}

	#[test]
	fn per_call_values_are_forwarded_verbatim() {
		let global = fallback("ca_global");
		let spaced = RequestParams::new().with(CLIENT_ID_PARAM, "ca 42");
		let long = "c".repeat(300);
		let options = RequestOptions::new().with_client_id(long.clone());

		assert_eq!(resolved(Some(&global), &spaced, None), "ca 42");
		assert_eq!(resolved(Some(&global), &RequestParams::new(), Some(&options)), long);
	}

	#[test]
	fn null_param_falls_through() {
		let global = fallback("ca_global");
		let params = RequestParams::new().with(CLIENT_ID_PARAM, ParamValue::Null);

		assert_eq!(resolved(Some(&global), &params, None), "ca_global");
	}
}
