//! Demonstrates exchanging an authorization code and deauthorizing the account with the
//! default reqwest executor. A local mock server stands in for the connect endpoints.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use oauth2_connect::{
	config::OAuthConfig, oauth::ReqwestOAuthClient, params::RequestParams,
	request::RequestOptions,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").header("authorization", "Bearer sk_platform");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"sk_connected\",\"refresh_token\":\"rt_connected\",\"token_type\":\"bearer\",\"account_id\":\"acct_demo\"}",
			);
		})
		.await;
	let deauthorize_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/deauthorize").header("idempotency-key", "demo-1");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"account_id\":\"acct_demo\"}");
		})
		.await;
	let config = OAuthConfig::builder()
		.connect_base(Url::parse(&server.base_url())?)
		.client_id("ca_demo")
		.api_key("sk_platform")
		.build()?;
	let client = ReqwestOAuthClient::new(config)?;
	let token = client.token(&RequestParams::authorization_code("ac_demo"), None).await?;

	println!("Token exchange returned {token:?}.");

	let account_id = token.account_id.map(String::from).unwrap_or_default();
	let options = RequestOptions::new().with_idempotency_key("demo-1");
	let account = client
		.deauthorize(&RequestParams::new().with("account_id", account_id), Some(&options))
		.await?;

	println!("Deauthorized {}.", account.account_id);

	token_mock.assert_async().await;
	deauthorize_mock.assert_async().await;

	Ok(())
}
