//! Authenticated API client built on reqwest.
//!
//! [`ApiClient::execute`] runs [`BearerTokenHandler::ensure_bearer_token`] before every call,
//! sends the request with every header from the shared
//! [`HeaderStore`](crate::headers::HeaderStore), and folds each failure into an [`ErrorResponse`]:
//!
//! - token acquisition failure: [`map_token_error`] (`401` or `-1`, no body);
//! - transport failure: `-1`, no body;
//! - non-2xx status: the status, raw body, and headers;
//! - undecodable body: the status, raw body, and headers, with the JSON path in the cause.

// crates.io
use reqwest::{Method, header::HeaderMap};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	bearer::{BearerTokenHandler, map_token_error},
	error::{ConfigError, TransportError},
	identity::IdentityClient,
	obs::{self, OperationKind, OperationSpan, Outcome},
	response::{ErrorResponse, Response, UNCLASSIFIED_CODE},
};

/// HTTP client that keeps a fresh bearer token on every request it sends.
pub struct ApiClient<C>
where
	C: ?Sized + IdentityClient,
{
	/// Base URL every request path is joined onto.
	pub base_url: Url,
	/// Underlying reqwest client.
	pub http_client: ReqwestClient,
	/// Handler injecting the bearer token into the shared header store.
	pub handler: BearerTokenHandler<C>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + IdentityClient,
{
	/// Creates a client for `base_url` with a freshly built reqwest client.
	///
	/// The base URL is treated as a directory: a missing trailing `/` is added, and request
	/// paths are resolved relative to it with any leading `/` ignored, so
	/// `https://host/v1` + `/profile` targets `https://host/v1/profile`.
	pub fn new(base_url: &str, handler: BearerTokenHandler<C>) -> Result<Self, ConfigError> {
		let mut base_url = Url::parse(base_url)?;

		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());

			base_url.set_path(&path);
		}

		let http_client =
			ReqwestClient::builder().build().map_err(ConfigError::http_client_build)?;

		Ok(Self { base_url, http_client, handler })
	}

	/// Replaces the underlying reqwest client.
	pub fn with_client(mut self, client: ReqwestClient) -> Self {
		self.http_client = client;

		self
	}

	/// Issues an authenticated `GET` and decodes the JSON body.
	pub async fn get<T>(&self, path: &str) -> Result<Response<T>, ErrorResponse>
	where
		T: DeserializeOwned,
	{
		self.execute::<T, ()>(Method::GET, path, None).await
	}

	/// Issues an authenticated request with an optional JSON body and decodes the JSON response.
	pub async fn execute<T, B>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
	) -> Result<Response<T>, ErrorResponse>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		const KIND: OperationKind = OperationKind::Request;

		let span = OperationSpan::new(KIND, "execute");

		let result = span
			.instrument(async move {
				if let Err(err) = self.handler.ensure_bearer_token().await {
					return map_token_error(err);
				}

				let url = self
					.endpoint(path)
					.map_err(|e| ErrorResponse::new(UNCLASSIFIED_CODE, e))?;
				let headers = self
					.handler
					.headers
					.to_header_map()
					.map_err(|e| ErrorResponse::new(UNCLASSIFIED_CODE, e))?;
				let mut request = self.http_client.request(method, url).headers(headers);

				if let Some(body) = body {
					let payload = serde_json::to_vec(body).map_err(|e| {
						ErrorResponse::new(UNCLASSIFIED_CODE, ConfigError::RequestBody { source: e })
					})?;

					request = request
						.header(reqwest::header::CONTENT_TYPE, "application/json")
						.body(payload);
				}

				let response = request.send().await.map_err(transport_failure)?;
				let status = response.status();
				let headers = header_snapshot(response.headers());
				let bytes = response.bytes().await.map_err(transport_failure)?.to_vec();

				if !status.is_success() {
					return Err(ErrorResponse::new(
						i32::from(status.as_u16()),
						Error::Status { status: status.as_u16() },
					)
					.with_response(bytes, headers));
				}

				decode_body(status.as_u16(), bytes, headers)
			})
			.await;

		match &result {
			Ok(_) => obs::record_outcome(KIND, Outcome::Success),
			Err(_) => obs::record_outcome(KIND, Outcome::Failure),
		}

		result
	}

	fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		Ok(self.base_url.join(path.trim_start_matches('/'))?)
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + IdentityClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.base_url.as_str())
			.field("handler", &self.handler)
			.finish()
	}
}

fn transport_failure(e: ReqwestError) -> ErrorResponse {
	ErrorResponse::new(UNCLASSIFIED_CODE, TransportError::from(e))
}

fn header_snapshot(headers: &HeaderMap) -> BTreeMap<String, String> {
	headers
		.iter()
		.filter_map(|(name, value)| {
			value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
		})
		.collect()
}

fn decode_body<T>(
	status: u16,
	bytes: Vec<u8>,
	headers: BTreeMap<String, String>,
) -> Result<Response<T>, ErrorResponse>
where
	T: DeserializeOwned,
{
	// Empty 2xx bodies decode as JSON `null` so unit-like targets still succeed.
	let decoded = {
		let source =
			if bytes.iter().all(u8::is_ascii_whitespace) { &b"null"[..] } else { &bytes[..] };
		let mut deserializer = serde_json::Deserializer::from_slice(source);
		let mut track = serde_path_to_error::Track::new();
		let body = T::deserialize(serde_path_to_error::Deserializer::new(
			&mut deserializer,
			&mut track,
		))
		.and_then(|body| deserializer.end().map(|()| body));

		body.map_err(|e| serde_path_to_error::Error::new(track.path(), e))
	};

	match decoded {
		Ok(body) => Ok(Response { status_code: status, headers, body }),
		Err(source) => Err(ErrorResponse::new(i32::from(status), Error::Decode { source })
			.with_response(bytes, headers)),
	}
}
