//! In-process [`IdentityClient`] for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::Tokens,
	identity::{FreshTokensFuture, IdentityClient},
};

/// Error reported when held tokens expired and this client has no way to refresh them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
#[error("Access token expired and no refresh handler is installed.")]
pub struct RefreshUnavailable;

/// Identity client that hands out whatever tokens were last stored in it.
///
/// Holds no refresh logic: an expired access token without a refresh token reports
/// [`AuthError::NotAuthenticated`]; one with a refresh token reports [`RefreshUnavailable`].
#[derive(Clone, Debug, Default)]
pub struct MemoryIdentityClient(Arc<RwLock<Option<Tokens>>>);
impl MemoryIdentityClient {
	/// Creates a client already holding `tokens`.
	pub fn with_tokens(tokens: Tokens) -> Self {
		Self(Arc::new(RwLock::new(Some(tokens))))
	}

	/// Stores `tokens`, replacing any previous value.
	pub fn set_tokens(&self, tokens: Tokens) {
		*self.0.write() = Some(tokens);
	}

	/// Drops the held tokens, as a logout would.
	pub fn clear(&self) -> Option<Tokens> {
		self.0.write().take()
	}

	/// Returns a copy of the held tokens.
	pub fn tokens(&self) -> Option<Tokens> {
		self.0.read().clone()
	}

	fn fresh_now(&self, now: OffsetDateTime) -> Result<Tokens, AuthError> {
		match self.0.read().as_ref() {
			None => Err(AuthError::NotAuthenticated),
			Some(tokens) if !tokens.is_expired_at(now) => Ok(tokens.clone()),
			Some(tokens) if tokens.refresh_token.is_none() => Err(AuthError::NotAuthenticated),
			Some(_) => Err(AuthError::other(RefreshUnavailable)),
		}
	}
}
impl IdentityClient for MemoryIdentityClient {
	fn perform_with_fresh_tokens(&self) -> FreshTokensFuture<'_> {
		let outcome = self.fresh_now(OffsetDateTime::now_utc());

		Box::pin(async move { outcome })
	}
}
