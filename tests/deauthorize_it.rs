// crates.io
use serde_json::json;
use url::Url;
// self
use oauth2_connect::{
	config::{BaseAddress, OAuthConfig},
	error::Error,
	http::RecordingExecutor,
	oauth::OAuthClient,
	params::RequestParams,
	request::{Method, RequestOptions},
};

fn client(fallback: Option<&str>, executor: &RecordingExecutor) -> OAuthClient<RecordingExecutor> {
	let mut builder = OAuthConfig::builder().connect_base(
		Url::parse("https://connect.example.com").expect("Connect base should parse."),
	);

	if let Some(client_id) = fallback {
		builder = builder.client_id(client_id);
	}

	OAuthClient::with_executor(
		builder.build().expect("Configuration should build."),
		executor.clone(),
	)
}

#[tokio::test]
async fn posts_explicit_client_id_without_mutating_input() {
	let executor = RecordingExecutor::new().respond_json(200, json!({ "account_id": "acct_x" }));
	let client = client(Some("ca_123"), &executor);
	let params = RequestParams::new().with("client_id", "ca_x").with("account_id", "acct_x");
	let before = params.clone();
	let account = client
		.deauthorize(&params, Some(&RequestOptions::new().with_idempotency_key("idem-1")))
		.await
		.expect("Deauthorization should succeed.");

	assert_eq!(account.account_id.as_str(), "acct_x");
	assert_eq!(params, before);

	let requests = executor.requests();

	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].base, BaseAddress::Connect);
	assert_eq!(requests[0].method, Method::Post);
	assert_eq!(requests[0].path, "/oauth/deauthorize");
	assert_eq!(requests[0].params.get_str("client_id"), Some("ca_x"));
	assert_eq!(requests[0].options.idempotency_key.as_deref(), Some("idem-1"));
}

#[tokio::test]
async fn shared_params_are_safe_across_concurrent_calls() {
	let executor = RecordingExecutor::new()
		.respond_json(200, json!({ "account_id": "acct_a" }))
		.respond_json(200, json!({ "account_id": "acct_a" }));
	let client = client(None, &executor);
	let params = RequestParams::new().with("account_id", "acct_a");
	let first = RequestOptions::new().with_client_id("ca_first");
	let second = RequestOptions::new().with_client_id("ca_second");
	let (a, b) = tokio::join!(
		client.deauthorize(&params, Some(&first)),
		client.deauthorize(&params, Some(&second))
	);

	a.expect("First deauthorization should succeed.");
	b.expect("Second deauthorization should succeed.");

	let mut sent = executor
		.requests()
		.into_iter()
		.filter_map(|request| request.params.get_str("client_id").map(str::to_owned))
		.collect::<Vec<_>>();

	sent.sort();

	assert_eq!(sent, ["ca_first", "ca_second"]);
	assert!(!params.contains_key("client_id"));
}

#[tokio::test]
async fn oauth_rejections_are_classified() {
	let executor = RecordingExecutor::new().respond_json(
		401,
		json!({ "error": "invalid_client", "error_description": "No such application: ca_gone" }),
	);
	let client = client(Some("ca_gone"), &executor);
	let err = client
		.deauthorize(&RequestParams::new().with("account_id", "acct_1"), None)
		.await
		.expect_err("Unknown applications should be rejected.");

	match err {
		Error::OAuth(oauth) => {
			assert_eq!(oauth.code.as_str(), "invalid_client");
			assert_eq!(oauth.status, 401);
			assert_eq!(oauth.description.as_deref(), Some("No such application: ca_gone"));
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}
