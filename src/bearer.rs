//! Bearer token injection and token-failure classification.
//!
//! [`BearerTokenHandler::ensure_bearer_token`] awaits the identity client's fresh-token call
//! and, on success, writes `Authorization: Bearer <token>` into the shared [`HeaderStore`].
//! Failures are logged and handed back untouched; the header store is only ever written after
//! a successful acquisition and is never cleared here. Callers route those failures through
//! [`map_token_error`] to obtain a uniform [`ErrorResponse`]:
//!
//! | Failure                          | Status code |
//! |----------------------------------|-------------|
//! | [`AuthError::NotAuthenticated`]  | `401`       |
//! | anything else                    | `-1`        |
//!
//! The handler takes no lock around the header write. Concurrent acquisitions are last-writer
//! wins unless the identity client serializes them (see
//! [`SingleFlight`](crate::identity::SingleFlight)).

mod counters;
mod scheme;

pub use counters::BearerMetrics;
pub use scheme::AuthorizationScheme;

// self
use crate::{
	_prelude::*,
	headers::HeaderStore,
	identity::IdentityClient,
	obs::{self, OperationKind, OperationSpan, Outcome},
	response::{ErrorResponse, NOT_AUTHENTICATED_CODE, Response, UNCLASSIFIED_CODE},
};

/// Keeps a fresh bearer token in a [`HeaderStore`] on behalf of an HTTP client layer.
pub struct BearerTokenHandler<C>
where
	C: ?Sized + IdentityClient,
{
	/// Identity client that owns the token lifecycle.
	pub identity: Arc<C>,
	/// Header store read by the HTTP layer when building requests.
	pub headers: HeaderStore,
	/// Header name and prefix used for injection.
	pub scheme: AuthorizationScheme,
	/// Shared counters for acquisition outcomes.
	pub metrics: Arc<BearerMetrics>,
}
impl<C> BearerTokenHandler<C>
where
	C: ?Sized + IdentityClient,
{
	/// Creates a handler writing the default `Authorization: Bearer` header into `headers`.
	pub fn new(identity: impl Into<Arc<C>>, headers: HeaderStore) -> Self {
		Self {
			identity: identity.into(),
			headers,
			scheme: AuthorizationScheme::default(),
			metrics: Default::default(),
		}
	}

	/// Overrides the header name and prefix.
	pub fn with_scheme(mut self, scheme: AuthorizationScheme) -> Self {
		self.scheme = scheme;

		self
	}

	/// Ensures the header store carries a currently valid bearer token.
	///
	/// Retries, backoff, and refresh coordination belong to the identity client; this call
	/// performs exactly one fresh-token request. On failure the error is logged and returned
	/// unchanged so it can be passed to [`map_token_error`].
	pub async fn ensure_bearer_token(&self) -> Result<(), AuthError> {
		const KIND: OperationKind = OperationKind::EnsureBearerToken;

		let span = OperationSpan::new(KIND, "ensure_bearer_token");

		let result = span
			.instrument(async move {
				let tokens = self.identity.perform_with_fresh_tokens().await?;

				self.headers.set(
					self.scheme.header(),
					self.scheme.header_value(tokens.access_token.expose()),
				);

				Ok::<_, AuthError>(())
			})
			.await;

		if let Err(err) = &result {
			obs::warn_token_failure(err);
		}

		let outcome = Outcome::of_token_result(&result);

		self.metrics.record(outcome);
		obs::record_outcome(KIND, outcome);

		result
	}
}
impl<C> Clone for BearerTokenHandler<C>
where
	C: ?Sized + IdentityClient,
{
	fn clone(&self) -> Self {
		Self {
			identity: self.identity.clone(),
			headers: self.headers.clone(),
			scheme: self.scheme.clone(),
			metrics: self.metrics.clone(),
		}
	}
}
impl<C> Debug for BearerTokenHandler<C>
where
	C: ?Sized + IdentityClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BearerTokenHandler")
			.field("scheme", &self.scheme)
			.field("headers_set", &self.headers.len())
			.finish()
	}
}

/// Classifies a token-acquisition failure into an [`ErrorResponse`].
///
/// Always yields `Err`: [`AuthError::NotAuthenticated`] maps to [`NOT_AUTHENTICATED_CODE`],
/// every other failure to [`UNCLASSIFIED_CODE`]. Body and headers are left empty and the
/// original error becomes the cause.
pub fn map_token_error<T>(error: AuthError) -> Result<Response<T>, ErrorResponse> {
	let status_code = match &error {
		AuthError::NotAuthenticated => NOT_AUTHENTICATED_CODE,
		AuthError::Other(_) => UNCLASSIFIED_CODE,
	};

	Err(ErrorResponse::new(status_code, error))
}
