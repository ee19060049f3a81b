//! Demonstrates building connect authorization URLs without touching the network.
//!
//! The configured client identifier is used unless the request options or the parameters
//! carry their own; the resolved value is written back into the caller's parameters.

// std
use std::collections::BTreeMap;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth2_connect::{
	config::OAuthConfig,
	http::RecordingExecutor,
	oauth::OAuthClient,
	params::{ParamValue, RequestParams},
	request::RequestOptions,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = OAuthConfig::builder()
		.connect_base(Url::parse("https://connect.example.com")?)
		.client_id("ca_demo")
		.build()?;
	let client = OAuthClient::with_executor(config, RecordingExecutor::new());
	let mut user = BTreeMap::new();

	user.insert("email".to_owned(), ParamValue::from("owner@shop.example.com"));
	user.insert("country".to_owned(), ParamValue::from("US"));

	let mut params = RequestParams::new()
		.with("redirect_uri", "https://app.example.com/connect/callback")
		.with("scope", "read_write")
		.with("state", "csrf-4f1d")
		.with("user", user);
	let url = client.authorize_url(&mut params, None)?;

	println!("Send the account owner to: {url}.");
	println!("Parameters after the call: {params:?}.");

	let options = RequestOptions::new().with_client_id("ca_other_platform");
	let url = client.authorize_url(&mut RequestParams::new(), Some(&options))?;

	println!("Per-call client identifier: {url}.");

	Ok(())
}
