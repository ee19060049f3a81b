//! Validated identifiers for OAuth clients and connected accounts.
//!
//! Both families share one rule set: non-empty, no whitespace anywhere, and at most 255
//! characters. Values are otherwise opaque; no prefix is enforced. Client identifiers supplied
//! per call (request options or the `client_id` parameter) are forwarded as given and only
//! need to be non-empty.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

const MAX_IDENTIFIER_CHARS: usize = 255;

macro_rules! connect_id {
	($(#[$meta:meta])* $name:ident => $kind:expr) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Family checked when this identifier is constructed.
			pub const KIND: IdentifierKind = $kind;

			/// Validates `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				check(Self::KIND, &value)?;

				Ok(Self(value))
			}

			/// Borrows the raw identifier.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(id: $name) -> Self {
				id.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(raw: String) -> Result<Self, IdentifierError> {
				Self::new(raw)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(raw: &str) -> Result<Self, IdentifierError> {
				Self::new(raw)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&self.0).finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

connect_id! {
	/// OAuth client identifier issued to a platform application (`ca_...`).
	ClientId => IdentifierKind::Client
}
connect_id! {
	/// Identifier of an account connected to the platform (`acct_...`).
	AccountId => IdentifierKind::Account
}

impl ClientId {
	/// Wraps a non-empty client identifier supplied per call, skipping the format checks.
	pub(crate) fn from_caller(value: impl Into<String>) -> Self {
		Self(value.into())
	}
}

/// Identifier families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
	/// Platform application.
	Client,
	/// Connected account.
	Account,
}
impl IdentifierKind {
	/// Lowercase label used in error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			IdentifierKind::Client => "client",
			IdentifierKind::Account => "account",
		}
	}
}
impl Display for IdentifierKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Reasons an identifier is rejected.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// Nothing was supplied.
	#[error("The {kind} identifier is empty.")]
	Empty {
		/// Rejected family.
		kind: IdentifierKind,
	},
	/// Whitespace appears in the value.
	#[error("The {kind} identifier contains whitespace at byte {offset}.")]
	Whitespace {
		/// Rejected family.
		kind: IdentifierKind,
		/// Byte offset of the first whitespace character.
		offset: usize,
	},
	/// The value is longer than the service accepts.
	#[error("The {kind} identifier is {len} characters long; at most {max} are accepted.")]
	TooLong {
		/// Rejected family.
		kind: IdentifierKind,
		/// Character count of the rejected value.
		len: usize,
		/// Maximum character count.
		max: usize,
	},
}
impl IdentifierError {
	/// Family of the rejected identifier.
	pub fn kind(&self) -> IdentifierKind {
		match self {
			IdentifierError::Empty { kind }
			| IdentifierError::Whitespace { kind, .. }
			| IdentifierError::TooLong { kind, .. } => *kind,
		}
	}
}

fn check(kind: IdentifierKind, raw: &str) -> Result<(), IdentifierError> {
	if raw.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if let Some((offset, _)) = raw.char_indices().find(|(_, c)| c.is_whitespace()) {
		return Err(IdentifierError::Whitespace { kind, offset });
	}

	let len = raw.chars().count();

	if len > MAX_IDENTIFIER_CHARS {
		return Err(IdentifierError::TooLong { kind, len, max: MAX_IDENTIFIER_CHARS });
	}

	Ok(())
}
