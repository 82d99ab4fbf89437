//! Uniform success and failure shapes returned to API callers.

// self
use crate::_prelude::*;

/// Status code attached to failures that require a fresh interactive login.
pub const NOT_AUTHENTICATED_CODE: i32 = 401;
/// Sentinel status code for unclassified, non-HTTP failures.
pub const UNCLASSIFIED_CODE: i32 = -1;

/// Successful, decoded API response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response<T> {
	/// HTTP status code.
	pub status_code: u16,
	/// Response headers, keyed by lower-case name.
	pub headers: BTreeMap<String, String>,
	/// Decoded body.
	pub body: T,
}

/// Failed API call, whether it failed before, during, or after the HTTP exchange.
#[derive(Debug, ThisError)]
#[error("Request failed with status code {status_code}.")]
pub struct ErrorResponse {
	/// HTTP status code, [`NOT_AUTHENTICATED_CODE`] for login-required failures, or
	/// [`UNCLASSIFIED_CODE`] when no status applies.
	pub status_code: i32,
	/// Raw response body, when a response was received.
	pub body: Option<Vec<u8>>,
	/// Response headers, when a response was received.
	pub headers: Option<BTreeMap<String, String>>,
	/// Underlying failure.
	#[source]
	pub cause: Error,
}
impl ErrorResponse {
	/// Creates a failure with no response body or headers attached.
	pub fn new(status_code: i32, cause: impl Into<Error>) -> Self {
		Self { status_code, body: None, headers: None, cause: cause.into() }
	}

	/// Attaches the raw response body and headers.
	pub fn with_response(mut self, body: Vec<u8>, headers: BTreeMap<String, String>) -> Self {
		self.body = Some(body);
		self.headers = Some(headers);

		self
	}

	/// Returns `true` when the caller should prompt the user to log in again.
	pub fn requires_login(&self) -> bool {
		self.status_code == NOT_AUTHENTICATED_CODE
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn error_response_exposes_cause_as_source() {
		let response = ErrorResponse::new(NOT_AUTHENTICATED_CODE, AuthError::NotAuthenticated);

		assert!(response.requires_login());
		assert!(response.body.is_none() && response.headers.is_none());

		let source = StdError::source(&response).expect("Cause should be exposed as the source.");

		assert_eq!(source.to_string(), AuthError::NotAuthenticated.to_string());
	}

	#[test]
	fn unclassified_failures_do_not_require_login() {
		let response = ErrorResponse::new(UNCLASSIFIED_CODE, Error::Status { status: 500 })
			.with_response(b"oops".to_vec(), BTreeMap::new());

		assert!(!response.requires_login());
		assert_eq!(response.body.as_deref(), Some(&b"oops"[..]));
	}
}
