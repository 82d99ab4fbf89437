//! Default request headers shared between the bearer handler and the HTTP layer.
//!
//! [`HeaderStore`] is an explicitly passed request context: clones share one map, so a token
//! written by [`BearerTokenHandler`](crate::bearer::BearerTokenHandler) is visible to every
//! request built afterwards from any clone. Writes are last-writer-wins.

// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Header name the bearer handler writes by default.
pub const AUTHORIZATION: &str = "Authorization";

/// Cheaply clonable, thread-safe map from header name to header value.
#[derive(Clone, Debug, Default)]
pub struct HeaderStore(Arc<RwLock<BTreeMap<String, String>>>);
impl HeaderStore {
	/// Sets `name` to `value`, returning the previous value.
	pub fn set(&self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.0.write().insert(name.into(), value.into())
	}

	/// Returns the current value of `name`.
	pub fn get(&self, name: &str) -> Option<String> {
		self.0.read().get(name).cloned()
	}

	/// Removes `name`, returning the value it held.
	pub fn remove(&self, name: &str) -> Option<String> {
		self.0.write().remove(name)
	}

	/// Returns the current `Authorization` header value.
	pub fn authorization(&self) -> Option<String> {
		self.get(AUTHORIZATION)
	}

	/// Copies every header into an owned map.
	pub fn snapshot(&self) -> BTreeMap<String, String> {
		self.0.read().clone()
	}

	/// Returns the number of stored headers.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when no header is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	/// Converts the stored headers into a reqwest [`HeaderMap`](reqwest::header::HeaderMap).
	#[cfg(feature = "reqwest")]
	pub fn to_header_map(&self) -> Result<reqwest::header::HeaderMap, ConfigError> {
		// crates.io
		use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

		let headers = self.0.read();
		let mut map = HeaderMap::with_capacity(headers.len());

		for (name, value) in headers.iter() {
			let invalid = || ConfigError::InvalidHeader { name: name.clone() };
			let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
			let mut header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;

			if name.eq_ignore_ascii_case(AUTHORIZATION) {
				header_value.set_sensitive(true);
			}

			map.insert(header_name, header_value);
		}

		Ok(map)
	}
}
