//! Keep a fresh OAuth bearer token on every outbound request: delegate the refresh to your
//! identity client, inject the `Authorization` header, and map failures into uniform error
//! responses.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod bearer;
pub mod error;
pub mod headers;
#[cfg(feature = "reqwest")] pub mod http;
pub mod identity;
pub mod obs;
pub mod response;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Tokens,
		bearer::BearerTokenHandler,
		headers::HeaderStore,
		identity::{FreshTokensFuture, IdentityClient, MemoryIdentityClient},
	};

	/// Handler type alias used by integration tests.
	pub type MemoryTestHandler = BearerTokenHandler<MemoryIdentityClient>;

	/// Builds a handler backed by an in-memory identity client holding `access_token`.
	pub fn build_memory_test_handler(
		access_token: &str,
	) -> (MemoryTestHandler, Arc<MemoryIdentityClient>, HeaderStore) {
		let client = Arc::new(MemoryIdentityClient::with_tokens(Tokens::new(access_token)));
		let headers = HeaderStore::default();
		let handler = BearerTokenHandler::new(client.clone(), headers.clone());

		(handler, client, headers)
	}

	/// Identity client that replays a fixed queue of outcomes and counts calls.
	///
	/// Once the queue is drained every call yields [`AuthError::NotAuthenticated`].
	#[derive(Debug, Default)]
	pub struct ScriptedIdentityClient {
		outcomes: Mutex<std::collections::VecDeque<Result<Tokens, AuthError>>>,
		calls: std::sync::atomic::AtomicUsize,
	}
	impl ScriptedIdentityClient {
		/// Creates a client that replays `outcomes` in order.
		pub fn new(outcomes: impl IntoIterator<Item = Result<Tokens, AuthError>>) -> Self {
			Self { outcomes: Mutex::new(outcomes.into_iter().collect()), calls: Default::default() }
		}

		/// Returns how many times [`IdentityClient::perform_with_fresh_tokens`] ran.
		pub fn calls(&self) -> usize {
			self.calls.load(std::sync::atomic::Ordering::SeqCst)
		}
	}
	impl IdentityClient for ScriptedIdentityClient {
		fn perform_with_fresh_tokens(&self) -> FreshTokensFuture<'_> {
			self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

			let next = self.outcomes.lock().pop_front();

			Box::pin(async move { next.unwrap_or(Err(AuthError::NotAuthenticated)) })
		}
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{AuthError, Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {bearer_token_handler as _, color_eyre as _, httpmock as _, tracing_subscriber as _};
