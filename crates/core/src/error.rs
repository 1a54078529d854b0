//! Error types for actors, abilities and interactions.

use thiserror::Error;

/// Result type alias for screenplay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring an actor or running its interactions.
///
/// Nothing in this crate catches or retries these; every failure unwinds the
/// current `attempts_to` / `asks_for` / `calls` and reaches the test verbatim.
#[derive(Debug, Error)]
pub enum Error {
	/// The actor was asked for a capability it was never given.
	#[error("{actor} does not have the ability '{ability}'")]
	MissingAbility {
		/// Display name of the actor.
		actor: String,
		/// Capability name that failed to resolve.
		ability: &'static str,
	},

	/// A capability name was bound twice without an explicit overwrite.
	#[error("ability '{0}' is already registered")]
	AbilityAlreadyRegistered(&'static str),

	/// Two capability types share a name but disagree on the handle type.
	#[error("ability '{ability}' holds a handle of a different type (expected {expected})")]
	AbilityTypeMismatch {
		ability: &'static str,
		expected: &'static str,
	},

	/// A verification did not hold when it was checked.
	#[error("assertion failed: {0}")]
	Assertion(String),

	/// A bounded wait elapsed without its condition being met.
	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	/// The underlying UI or HTTP operation failed.
	#[error("transport error: {0}")]
	Transport(String),

	/// An HTTP call answered with a status the caller did not accept.
	#[error("{method} {url} returned HTTP {status}")]
	UnexpectedStatus {
		method: &'static str,
		url: String,
		status: u16,
	},

	/// Error reported by a WebDriver endpoint.
	#[error("webdriver {error}: {message}")]
	Driver {
		/// WebDriver error code (e.g., "no such element", "invalid session id")
		error: String,
		/// Human-readable message from the driver
		message: String,
	},

	/// Invalid argument provided to an ability or interaction.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error(transparent)]
	Http(#[from] reqwest::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error("invalid url: {0}")]
	InvalidUrl(#[from] url::ParseError),
}

impl Error {
	/// Builds an [`Error::Assertion`].
	pub fn assertion(message: impl Into<String>) -> Self {
		Error::Assertion(message.into())
	}

	/// Returns the capability name if this is a missing-ability error.
	pub fn missing_ability(&self) -> Option<&'static str> {
		match self {
			Error::MissingAbility { ability, .. } => Some(ability),
			_ => None,
		}
	}

	/// Returns true if this is a missing-ability error.
	pub fn is_missing_ability(&self) -> bool {
		self.missing_ability().is_some()
	}

	/// Returns true if a verification failed.
	pub fn is_assertion(&self) -> bool {
		matches!(self, Error::Assertion(_))
	}

	/// Returns true if a bounded wait elapsed.
	pub fn is_timeout(&self) -> bool {
		match self {
			Error::Timeout { .. } => true,
			Error::Http(err) => err.is_timeout(),
			_ => false,
		}
	}

	/// Returns true if the UI or HTTP operation itself failed.
	pub fn is_transport(&self) -> bool {
		match self {
			Error::Transport(_) | Error::UnexpectedStatus { .. } | Error::Driver { .. } => true,
			Error::Http(err) => !err.is_timeout(),
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_ability_names_the_capability() {
		let err = Error::MissingAbility {
			actor: "Tester".into(),
			ability: "http context",
		};
		assert_eq!(err.missing_ability(), Some("http context"));
		assert_eq!(err.to_string(), "Tester does not have the ability 'http context'");
	}

	#[test]
	fn classifiers_are_disjoint() {
		let timeout = Error::Timeout {
			ms: 500,
			condition: "result links".into(),
		};
		assert!(timeout.is_timeout());
		assert!(!timeout.is_assertion());
		assert!(!timeout.is_transport());

		let status = Error::UnexpectedStatus {
			method: "GET",
			url: "https://api.github.com/x".into(),
			status: 404,
		};
		assert!(status.is_transport());
		assert!(!status.is_timeout());
		assert_eq!(status.to_string(), "GET https://api.github.com/x returned HTTP 404");

		assert!(Error::assertion("nope").is_assertion());
	}
}
