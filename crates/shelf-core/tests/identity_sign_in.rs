//! Integration tests for the identity client against a mock provider.

use shelf_core::auth::IdentityClient;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_sign_in_success_returns_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .and(query_param("key", "test-api-key"))
        .and(body_partial_json(serde_json::json!({
            "email": "reader@example.com",
            "password": "hunter2",
            "returnSecureToken": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "uid-42",
            "email": "reader@example.com",
            "idToken": "token-abc",
            "refreshToken": "refresh-xyz",
            "expiresIn": "3600",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = IdentityClient::new(&server.uri(), "test-api-key");
    let session = client.sign_in("reader@example.com", "hunter2").await.unwrap();

    assert_eq!(session.user_id, "uid-42");
    assert_eq!(session.email, "reader@example.com");
    assert_eq!(session.id_token, "token-abc");
}

#[tokio::test]
async fn test_sign_in_bad_credentials_maps_error_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 400, "message": "INVALID_PASSWORD" }
        })))
        .mount(&server)
        .await;

    let client = IdentityClient::new(&server.uri(), "test-api-key");
    let err = client.sign_in("reader@example.com", "wrong").await.unwrap_err();

    assert!(err.to_string().contains("email or password is incorrect"));
}

#[tokio::test]
async fn test_sign_in_provider_outage_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let client = IdentityClient::new(&server.uri(), "test-api-key");
    let err = client.sign_in("reader@example.com", "hunter2").await.unwrap_err();

    assert!(err.to_string().contains("500"));
}
