// self
use crate::{
	_prelude::*,
	config::BaseAddress,
	http::{RequestExecutor, RequestExecutorExt},
	model::DeauthorizedAccount,
	oauth::{CLIENT_ID_PARAM, DEAUTHORIZE_PATH, OAuthClient},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	params::RequestParams,
	request::{ApiRequest, Method, RequestOptions},
};

impl<E> OAuthClient<E>
where
	E: ?Sized + RequestExecutor,
{
	/// Disconnects an account from the platform.
	///
	/// Works on a copy of `params`: the resolved client identifier is added to the copy, which
	/// is posted to `/oauth/deauthorize` on the connect base. The caller's map is left as is.
	pub async fn deauthorize(
		&self,
		params: &RequestParams,
		options: Option<&RequestOptions>,
	) -> Result<DeauthorizedAccount> {
		const KIND: OperationKind = OperationKind::Deauthorize;

		let span = OperationSpan::new(KIND, "deauthorize");

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut body = params.clone();
				let client_id = self.resolve_client_id(&body, options)?;

				body.insert(CLIENT_ID_PARAM, String::from(client_id));

				let request =
					ApiRequest::new(BaseAddress::Connect, Method::Post, DEAUTHORIZE_PATH, body)
						.with_options(options);

				self.executor.request::<DeauthorizedAccount>(request).await
			})
			.await;

		obs::record_result(&span, KIND, &result);

		result
	}
}
