// self
use crate::{_prelude::*, error::ConfigError, headers::AUTHORIZATION};

/// Header name and prefix used when injecting an access token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationScheme {
	header: String,
	prefix: String,
}
impl AuthorizationScheme {
	/// Creates a scheme writing `<prefix> <token>` into `header`.
	pub fn new(header: impl Into<String>, prefix: impl Into<String>) -> Result<Self, ConfigError> {
		let header = validate_part(header.into())?;
		let prefix = validate_part(prefix.into())?;

		Ok(Self { header, prefix })
	}

	/// Header the token is written to.
	pub fn header(&self) -> &str {
		&self.header
	}

	/// Prefix placed before the token.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Formats the header value for `token`.
	pub fn header_value(&self, token: &str) -> String {
		format!("{} {token}", self.prefix)
	}
}
impl Default for AuthorizationScheme {
	fn default() -> Self {
		Self { header: AUTHORIZATION.into(), prefix: "Bearer".into() }
	}
}

fn validate_part(value: String) -> Result<String, ConfigError> {
	if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c.is_control()) {
		Err(ConfigError::InvalidScheme { value })
	} else {
		Ok(value)
	}
}
