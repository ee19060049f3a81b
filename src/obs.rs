//! Optional observability helpers for the OAuth operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_connect.operation` with the
//!   `operation`, `stage` (call site), and `outcome` fields.
//! - Enable `metrics` to increment the `oauth2_connect_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// OAuth operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Authorization URL construction.
	AuthorizeUrl,
	/// Authorization code (or refresh token) exchange.
	Token,
	/// Account disconnection.
	Deauthorize,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::AuthorizeUrl => "authorize_url",
			OperationKind::Token => "token",
			OperationKind::Deauthorize => "deauthorize",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}

	/// Maps a result onto its terminal outcome.
	pub fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { OperationOutcome::Success } else { OperationOutcome::Failure }
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the terminal outcome of `result` on `span` and in the operation counter.
pub fn record_result<T>(span: &OperationSpan, kind: OperationKind, result: &Result<T>) {
	let outcome = OperationOutcome::of(result);

	span.record_outcome(outcome);
	record_operation_outcome(kind, outcome);
}
