//! Serializes fresh-token calls so at most one refresh is in flight per client.

// self
use crate::{
	_prelude::*,
	identity::{FreshTokensFuture, IdentityClient},
};

/// [`IdentityClient`] wrapper holding an async guard around the inner call.
///
/// Concurrent callers queue on the guard and run the inner call one after another, so a client
/// that caches its last refresh answers the queued callers without contacting the provider
/// again.
#[derive(Debug)]
pub struct SingleFlight<C>
where
	C: ?Sized,
{
	guard: AsyncMutex<()>,
	inner: Arc<C>,
}
impl<C> SingleFlight<C>
where
	C: ?Sized + IdentityClient,
{
	/// Wraps `inner`.
	pub fn new(inner: impl Into<Arc<C>>) -> Self {
		Self { guard: AsyncMutex::new(()), inner: inner.into() }
	}

	/// Returns the wrapped client.
	pub fn inner(&self) -> &Arc<C> {
		&self.inner
	}
}
impl<C> IdentityClient for SingleFlight<C>
where
	C: ?Sized + IdentityClient,
{
	fn perform_with_fresh_tokens(&self) -> FreshTokensFuture<'_> {
		Box::pin(async move {
			let _singleflight = self.guard.lock().await;

			self.inner.perform_with_fresh_tokens().await
		})
	}
}
