//! Optional observability helpers for handler operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `bearer_token_handler.operation` with the
//!   `operation` and `stage` (call site) fields, plus a warning whenever token acquisition fails.
//! - Enable `metrics` to increment the `bearer_token_handler_operation_total` counter once per
//!   finished operation, labeled by `operation` + `outcome`.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Operations observed by the handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Fresh-token acquisition + header injection.
	EnsureBearerToken,
	/// Authenticated API request issued through the HTTP layer.
	Request,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::EnsureBearerToken => "ensure_bearer_token",
			OperationKind::Request => "request",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// How a finished operation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// The header was written or the response decoded.
	Success,
	/// The identity client requires a fresh interactive login.
	NotAuthenticated,
	/// Any other failure handed back to the caller.
	Failure,
}
impl Outcome {
	/// Classifies a token-acquisition result.
	pub fn of_token_result(result: &Result<(), AuthError>) -> Self {
		match result {
			Ok(()) => Outcome::Success,
			Err(AuthError::NotAuthenticated) => Outcome::NotAuthenticated,
			Err(AuthError::Other(_)) => Outcome::Failure,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Success => "success",
			Outcome::NotAuthenticated => "not_authenticated",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(OperationKind::EnsureBearerToken.to_string(), "ensure_bearer_token");
		assert_eq!(OperationKind::Request.as_str(), "request");
		assert_eq!(Outcome::NotAuthenticated.to_string(), "not_authenticated");
	}

	#[test]
	fn token_results_classify_by_auth_error() {
		assert_eq!(Outcome::of_token_result(&Ok(())), Outcome::Success);
		assert_eq!(
			Outcome::of_token_result(&Err(AuthError::NotAuthenticated)),
			Outcome::NotAuthenticated
		);
		assert_eq!(
			Outcome::of_token_result(&Err(AuthError::other(std::fmt::Error))),
			Outcome::Failure
		);
	}
}
