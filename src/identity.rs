//! Identity client contract consumed by the bearer handler.
//!
//! An [`IdentityClient`] owns the whole token lifecycle: it decides whether the cached access
//! token is still valid, refreshes it with the refresh token when it is not, and reports
//! [`AuthError::NotAuthenticated`] once the refresh token itself is rejected. The handler only
//! awaits the outcome. Wrap a client in [`SingleFlight`] when the provider does not serialize
//! concurrent refreshes on its own.

pub mod memory;
pub mod single_flight;

pub use memory::MemoryIdentityClient;
pub use single_flight::SingleFlight;

// self
use crate::{_prelude::*, auth::Tokens};

/// Boxed future returned by [`IdentityClient::perform_with_fresh_tokens`].
pub type FreshTokensFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Tokens, AuthError>> + 'a + Send>>;

/// External identity client able to hand out a currently valid access token.
pub trait IdentityClient
where
	Self: Send + Sync,
{
	/// Resolves to fresh tokens, refreshing them first when required.
	///
	/// Implementations handle the three cases internally: access token still valid, access
	/// token expired but refresh token valid, and refresh token expired (reported as
	/// [`AuthError::NotAuthenticated`]).
	fn perform_with_fresh_tokens(&self) -> FreshTokensFuture<'_>;
}
impl<C> IdentityClient for Arc<C>
where
	C: ?Sized + IdentityClient,
{
	fn perform_with_fresh_tokens(&self) -> FreshTokensFuture<'_> {
		C::perform_with_fresh_tokens(self.as_ref())
	}
}
