//! Access/refresh token pair returned by [`IdentityClient`](crate::identity::IdentityClient).

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Tokens produced by a successful fresh-token call. Consumed once, never retained by the
/// handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Expiry instant of the access token, when known.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub expires_at: Option<OffsetDateTime>,
}
impl Tokens {
	/// Creates tokens carrying only an access token.
	pub fn new(access_token: impl Into<TokenSecret>) -> Self {
		Self { access_token: access_token.into(), refresh_token: None, expires_at: None }
	}

	/// Attaches a refresh token.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(refresh_token.into());

		self
	}

	/// Sets the access token expiry instant.
	pub fn with_expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Returns `true` once the access token reached its expiry. Tokens without an expiry never
	/// expire.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn expiry_is_inclusive_and_optional() {
		let issued = macros::datetime!(2025-11-10 12:00 UTC);
		let tokens = Tokens::new("access").with_expires_at(issued + Duration::hours(1));

		assert!(!tokens.is_expired_at(issued));
		assert!(tokens.is_expired_at(issued + Duration::hours(1)));
		assert!(!Tokens::new("access").is_expired_at(issued + Duration::weeks(52)));
	}

	#[test]
	fn tokens_deserialize_with_rfc3339_expiry() {
		let tokens: Tokens = serde_json::from_str(
			r#"{"access_token":"a","refresh_token":"r","expires_at":"2025-11-10T13:00:00Z"}"#,
		)
		.expect("Tokens fixture should deserialize.");

		assert_eq!(tokens.access_token.expose(), "a");
		assert_eq!(tokens.refresh_token.as_ref().map(TokenSecret::expose), Some("r"));
		assert_eq!(tokens.expires_at, Some(macros::datetime!(2025-11-10 13:00 UTC)));
	}
}
