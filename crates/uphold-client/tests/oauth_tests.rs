/*
[INPUT]:  Mock token endpoint responses
[OUTPUT]: Test results for OAuth grant operations
[POS]:    Integration tests - authorization code and client credentials grants
[UPDATE]: When token endpoint handling changes
*/

mod common;

use common::{BASIC_HEADER, header, only_request, setup_mock_server, test_uphold};
use tokio_test::assert_ok;
use uphold_client::{OAuthResponse, OperationPolicy, UpholdError};
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_authorize_by_code_success() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string("code=abc123&grant_type=authorization_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok",
            "token_type": "bearer",
            "refresh_token": "r",
            "scope": "s",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uphold = test_uphold(&server);
    let token = assert_ok!(uphold.authorize_by_code("abc123").await);

    assert_eq!(
        token,
        OAuthResponse {
            access_token: "tok".to_string(),
            token_type: "bearer".to_string(),
            refresh_token: Some("r".to_string()),
            scope: Some("s".to_string()),
            expires_in: None,
        }
    );

    let request = only_request(&server).await;
    assert_eq!(header(&request, "authorization"), Some(BASIC_HEADER));
    assert_eq!(
        header(&request, "content-type"),
        Some("application/x-www-form-urlencoded")
    );
}

#[tokio::test]
async fn test_authorize_by_code_rejected() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
        })))
        .mount(&server)
        .await;

    let uphold = test_uphold(&server);
    let err = uphold.authorize_by_code("abc123").await.unwrap_err();

    match err {
        UpholdError::Domain {
            operation,
            status,
            body,
        } => {
            assert_eq!(operation, "authorize_by_code");
            assert_eq!(status, 400);
            assert_eq!(body["error"], "invalid_grant");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_authorize_by_code_malformed_token_is_decoding_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "unexpected": true,
        })))
        .mount(&server)
        .await;

    let err = test_uphold(&server)
        .authorize_by_code("abc123")
        .await
        .unwrap_err();
    assert!(matches!(err, UpholdError::Decoding { status: 200, .. }));
}

#[tokio::test]
async fn test_client_credentials_omits_scope_by_default() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "app-token",
            "token_type": "bearer",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uphold = test_uphold(&server);
    let token = assert_ok!(uphold.authorize_client_credentials("user:read").await);
    assert_eq!(token, "app-token");

    let request = only_request(&server).await;
    assert_eq!(header(&request, "authorization"), Some(BASIC_HEADER));
}

#[tokio::test]
async fn test_client_credentials_can_send_scope() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string("grant_type=client_credentials&scope=user%3Aread+cards%3Aread"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "scoped-token",
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uphold = test_uphold(&server).with_policy(OperationPolicy {
        send_client_credentials_scope: true,
        ..OperationPolicy::default()
    });
    let token = assert_ok!(uphold.authorize_client_credentials("user:read cards:read").await);
    assert_eq!(token, "scoped-token");
}

#[tokio::test]
async fn test_client_credentials_unauthorized() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_client",
        })))
        .mount(&server)
        .await;

    let err = test_uphold(&server)
        .authorize_client_credentials("")
        .await
        .unwrap_err();
    assert!(err.is_status(401));
    assert!(matches!(
        err,
        UpholdError::Domain {
            operation: "authorize_client_credentials",
            ..
        }
    ));
}
