// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::{ApiResponse, ExecutorFuture, RequestExecutor},
	request::ApiRequest,
};

/// In-memory executor that records every request and replays queued responses in order.
///
/// Clones share the same request log and response queue, so a test can hand one clone to an
/// [`OAuthClient`](crate::oauth::OAuthClient) and inspect traffic through another. When the
/// queue is empty the executor fails with a transport error.
#[derive(Clone, Debug, Default)]
pub struct RecordingExecutor {
	requests: Arc<Mutex<Vec<ApiRequest>>>,
	responses: Arc<Mutex<VecDeque<ApiResponse>>>,
}
impl RecordingExecutor {
	/// Creates an executor with an empty queue.
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a response.
	pub fn respond_with(self, response: ApiResponse) -> Self {
		self.responses.lock().push_back(response);

		self
	}

	/// Queues a JSON response.
	pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
		self.respond_with(ApiResponse::json(status, &body))
	}

	/// Returns every request dispatched so far.
	pub fn requests(&self) -> Vec<ApiRequest> {
		self.requests.lock().clone()
	}

	/// Returns the most recent request, if any.
	pub fn last_request(&self) -> Option<ApiRequest> {
		self.requests.lock().last().cloned()
	}
}
impl RequestExecutor for RecordingExecutor {
	fn execute(&self, request: ApiRequest) -> ExecutorFuture<'_, ApiResponse> {
		self.requests.lock().push(request);

		let next = self.responses.lock().pop_front();

		Box::pin(async move {
			next.ok_or_else(|| {
				Error::from(TransportError::Io(std::io::Error::new(
					std::io::ErrorKind::NotConnected,
					"RecordingExecutor has no queued response.",
				)))
			})
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{config::BaseAddress, params::RequestParams, request::Method};

	fn request(path: &str) -> ApiRequest {
		ApiRequest::new(BaseAddress::Connect, Method::Post, path, RequestParams::new())
	}

	#[tokio::test]
	async fn replays_queued_responses_in_order() {
		let executor = RecordingExecutor::new()
			.respond_json(200, json!({ "n": 1 }))
			.respond_json(200, json!({ "n": 2 }));
		let first = executor.execute(request("/a")).await.expect("First response should replay.");
		let second =
			executor.execute(request("/b")).await.expect("Second response should replay.");

		assert_eq!(first.body, br#"{"n":1}"#);
		assert_eq!(second.body, br#"{"n":2}"#);
		assert_eq!(
			executor.requests().into_iter().map(|req| req.path).collect::<Vec<_>>(),
			["/a", "/b"]
		);
	}

	#[tokio::test]
	async fn empty_queue_fails_as_transport_error() {
		let executor = RecordingExecutor::new();
		let err = executor
			.execute(request("/oauth/token"))
			.await
			.expect_err("Empty queue should fail.");

		assert!(matches!(err, Error::Transport(TransportError::Io(_))));
		assert_eq!(executor.last_request().map(|req| req.path), Some("/oauth/token".into()));
	}
}
