// std
use std::io;
// self
use bearer_token_handler::{
	_preludet::*,
	auth::Tokens,
	bearer::{BearerTokenHandler, map_token_error},
	headers::{AUTHORIZATION, HeaderStore},
	identity::{IdentityClient, SingleFlight},
	response::{NOT_AUTHENTICATED_CODE, UNCLASSIFIED_CODE},
};

fn scripted_handler(
	outcomes: impl IntoIterator<Item = Result<Tokens, AuthError>>,
) -> BearerTokenHandler<ScriptedIdentityClient> {
	BearerTokenHandler::new(ScriptedIdentityClient::new(outcomes), HeaderStore::default())
}

#[tokio::test]
async fn successful_acquisition_sets_bearer_header() {
	let (handler, _client, headers) = build_memory_test_handler("abc123");

	handler.ensure_bearer_token().await.expect("Acquisition should succeed for held tokens.");

	assert_eq!(headers.get(AUTHORIZATION).as_deref(), Some("Bearer abc123"));
}

#[tokio::test]
async fn not_authenticated_flows_into_401_response() {
	let (handler, client, headers) = build_memory_test_handler("abc123");

	client.clear();

	let err = handler
		.ensure_bearer_token()
		.await
		.expect_err("Acquisition should fail once the client is logged out.");

	assert!(err.is_not_authenticated());
	assert!(headers.authorization().is_none());

	let response = map_token_error::<Vec<String>>(err)
		.expect_err("Token failures must never map to a success.");

	assert_eq!(response.status_code, NOT_AUTHENTICATED_CODE);
	assert!(response.requires_login());
	assert!(response.body.is_none());
	assert!(response.headers.is_none());
	assert!(matches!(response.cause, Error::Auth(AuthError::NotAuthenticated)));
}

#[tokio::test]
async fn network_failure_flows_into_sentinel_response() {
	let handler = scripted_handler([Err(AuthError::other(io::Error::new(
		io::ErrorKind::NotConnected,
		"identity provider unreachable",
	)))]);
	let err = handler.ensure_bearer_token().await.expect_err("Acquisition should fail.");
	let response = map_token_error::<()>(err).expect_err("Token failures must never succeed.");

	assert_eq!(response.status_code, UNCLASSIFIED_CODE);
	assert!(!response.requires_login());
	assert_eq!(response.cause.to_string(), "identity provider unreachable");
	assert!(handler.headers.is_empty());
}

#[tokio::test]
async fn logout_keeps_previous_header() {
	let (handler, client, headers) = build_memory_test_handler("before-logout");

	handler.ensure_bearer_token().await.expect("First acquisition should succeed.");
	client.clear();
	handler.ensure_bearer_token().await.expect_err("Acquisition should fail after logout.");

	assert_eq!(headers.authorization().as_deref(), Some("Bearer before-logout"));
}

#[tokio::test]
async fn latest_acquisition_wins() {
	let (handler, client, headers) = build_memory_test_handler("first");

	handler.ensure_bearer_token().await.expect("First acquisition should succeed.");
	client.set_tokens(Tokens::new("second").with_refresh_token("refresh"));
	handler.ensure_bearer_token().await.expect("Second acquisition should succeed.");

	assert_eq!(headers.len(), 1);
	assert_eq!(headers.authorization().as_deref(), Some("Bearer second"));
	assert_eq!(handler.metrics.attempts(), 2);
	assert_eq!(handler.metrics.successes(), 2);
}

#[tokio::test]
async fn cloned_handlers_share_store_and_metrics() {
	let handler = scripted_handler([Ok(Tokens::new("one")), Ok(Tokens::new("two"))]);
	let clone = handler.clone();

	handler.ensure_bearer_token().await.expect("First acquisition should succeed.");
	clone.ensure_bearer_token().await.expect("Second acquisition should succeed.");

	assert_eq!(handler.headers.authorization().as_deref(), Some("Bearer two"));
	assert_eq!(handler.metrics.successes(), 2);
	assert_eq!(handler.identity.calls(), 2);
}

#[tokio::test]
async fn single_flight_handlers_share_one_identity_client() {
	let scripted = Arc::new(ScriptedIdentityClient::new([
		Ok(Tokens::new("a")),
		Ok(Tokens::new("b")),
		Ok(Tokens::new("c")),
	]));
	let identity: Arc<dyn IdentityClient> =
		Arc::new(SingleFlight::<ScriptedIdentityClient>::new(scripted.clone()));
	let headers = HeaderStore::default();
	let handler: BearerTokenHandler<dyn IdentityClient> =
		BearerTokenHandler::new(identity, headers.clone());
	let (first, second, third) = tokio::join!(
		handler.ensure_bearer_token(),
		handler.ensure_bearer_token(),
		handler.ensure_bearer_token(),
	);

	first.expect("First acquisition should succeed.");
	second.expect("Second acquisition should succeed.");
	third.expect("Third acquisition should succeed.");

	assert_eq!(scripted.calls(), 3);
	assert_eq!(headers.authorization().as_deref(), Some("Bearer c"));
}
