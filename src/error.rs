//! Error types shared across the handler, identity clients, and the HTTP layer.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by an identity client while acquiring a fresh access token.
///
/// The taxonomy is closed: callers branch on [`AuthError::NotAuthenticated`] to prompt an
/// interactive login and treat everything else as an unclassified failure.
#[derive(Clone, Debug, ThisError)]
pub enum AuthError {
	/// The refresh token is no longer valid; a fresh interactive login is required.
	#[error("Not authenticated; a fresh login is required.")]
	NotAuthenticated,
	/// Any other acquisition failure (network, malformed response, provider error).
	#[error("{0}")]
	Other(Arc<dyn std::error::Error + Send + Sync>),
}
impl AuthError {
	/// Wraps an arbitrary failure as [`AuthError::Other`].
	pub fn other(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Other(Arc::new(src))
	}

	/// Returns `true` for [`AuthError::NotAuthenticated`].
	pub fn is_not_authenticated(&self) -> bool {
		matches!(self, Self::NotAuthenticated)
	}
}

/// Canonical error carried as the cause of an [`ErrorResponse`](crate::response::ErrorResponse).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token acquisition failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Upstream answered with a non-success status.
	#[error("Request failed with HTTP status {status}.")]
	Status {
		/// HTTP status code returned upstream.
		status: u16,
	},
	/// Response body could not be decoded into the requested type.
	#[error("Response body could not be decoded.")]
	Decode {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL or request path cannot be parsed.
	#[error("Request URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Header store contains a name or value HTTP rejects.
	#[error("Header `{name}` cannot be sent over HTTP.")]
	InvalidHeader {
		/// Offending header name.
		name: String,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	RequestBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Authorization scheme header or prefix is empty or contains whitespace.
	#[error("Authorization scheme `{value}` is invalid.")]
	InvalidScheme {
		/// Rejected header name or prefix.
		value: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<url::ParseError> for ConfigError {
	fn from(e: url::ParseError) -> Self {
		Self::InvalidUrl { source: e }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while sending the request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
