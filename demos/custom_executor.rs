//! Demonstrates plugging a custom [`RequestExecutor`] into the OAuth client.
//!
//! The executor below answers from canned responses keyed by path. Any transport works the
//! same way: return the raw status and body, and let the crate classify failures.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use serde_json::json;
use url::Url;
// self
use oauth2_connect::{
	config::OAuthConfig,
	error::Error,
	http::{ApiResponse, ExecutorFuture, RequestExecutor},
	oauth::{DEAUTHORIZE_PATH, OAuthClient, TOKEN_PATH},
	params::RequestParams,
	request::ApiRequest,
};

#[derive(Debug, Default)]
struct CannedExecutor;
impl RequestExecutor for CannedExecutor {
	fn execute(&self, request: ApiRequest) -> ExecutorFuture<'_, ApiResponse> {
		Box::pin(async move {
			println!(
				"{} {} with {} parameter(s).",
				request.method,
				request.path,
				request.params.len()
			);

			let response = match request.path.as_str() {
				TOKEN_PATH if request.params.get_str("code") == Some("ac_demo") => ApiResponse::json(
					200,
					&json!({
						"access_token": "sk_test_connected",
						"token_type": "bearer",
						"scope": "read_write",
						"livemode": false,
						"account_id": "acct_demo"
					}),
				),
				TOKEN_PATH => ApiResponse::json(
					400,
					&json!({ "error": "invalid_grant", "error_description": "Unknown code." }),
				),
				DEAUTHORIZE_PATH => ApiResponse::json(
					200,
					&json!({ "account_id": request.params.get_str("account_id") }),
				),
				_ => ApiResponse::new(404, "not found"),
			};

			Ok(response)
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = OAuthConfig::builder()
		.connect_base(Url::parse("https://connect.example.com")?)
		.client_id("ca_demo")
		.build()?;
	let executor: Arc<dyn RequestExecutor> = Arc::new(CannedExecutor);
	let client: OAuthClient<dyn RequestExecutor> = OAuthClient::with_executor(config, executor);
	let token = client.token(&RequestParams::authorization_code("ac_demo"), None).await?;

	println!("Connected account: {:?}.", token.account_id);

	match client.token(&RequestParams::authorization_code("ac_unknown"), None).await {
		Err(Error::OAuth(e)) => println!("Rejected as expected: {e}."),
		other => println!("Unexpected outcome: {other:?}."),
	}

	let account =
		client.deauthorize(&RequestParams::new().with("account_id", "acct_demo"), None).await?;

	println!("Disconnected {}.", account.account_id);

	Ok(())
}
