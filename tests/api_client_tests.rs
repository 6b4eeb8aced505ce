// SPDX-License-Identifier: MIT

//! API client classification tests against a canned-response HTTP server.
//!
//! Every failure mode of the profile fetch must map to a classified
//! outcome, never an error: the controller's fail-open policy depends on it.

use sportify_session::{
    ApiClient, MemoryStore, ProfileDraft, ProfileOutcome, SessionController, SessionError,
    SessionState,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

mod common;
use common::jwt_for_user;

/// Serve exactly one canned HTTP response, returning the base URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 8192];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    format!("http://{addr}")
}

/// A base URL that refuses connections.
async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

const PROFILE_BODY: &str = r#"{"id":1,"first_name":"Alex","last_name":"Morgan","age":27,"gender":"Female","sports":["Soccer"]}"#;

fn draft() -> ProfileDraft {
    ProfileDraft {
        first_name: "Alex".to_string(),
        last_name: "Morgan".to_string(),
        age: 27,
        gender: "Female".to_string(),
        sports: vec!["Soccer".to_string()],
    }
}

#[tokio::test]
async fn profile_fetch_success_is_found() {
    let base = serve_once("200 OK", PROFILE_BODY).await;
    let client = ApiClient::new(base);

    let outcome = client.fetch_profile("tok123", Some(1)).await;
    match outcome {
        ProfileOutcome::Found(profile) => assert_eq!(profile.first_name, "Alex"),
        other => panic!("expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn profile_fetch_404_is_confirmed_absent() {
    let base = serve_once("404 Not Found", r#"{"error":"profile not found"}"#).await;
    let client = ApiClient::new(base);

    let outcome = client.fetch_profile("tok123", Some(1)).await;
    assert!(matches!(outcome, ProfileOutcome::ConfirmedAbsent));
}

#[tokio::test]
async fn profile_fetch_5xx_is_indeterminate() {
    let base = serve_once("500 Internal Server Error", "").await;
    let client = ApiClient::new(base);

    let outcome = client.fetch_profile("tok123", Some(1)).await;
    assert!(matches!(outcome, ProfileOutcome::Indeterminate(_)));
}

#[tokio::test]
async fn profile_fetch_auth_rejection_is_indeterminate() {
    // 401 during resolution is classified, not fatal: the generic request
    // path handles session teardown, the oracle never does.
    let base = serve_once("401 Unauthorized", "").await;
    let client = ApiClient::new(base);

    let outcome = client.fetch_profile("tok123", Some(1)).await;
    assert!(matches!(outcome, ProfileOutcome::Indeterminate(_)));
}

#[tokio::test]
async fn profile_fetch_malformed_body_is_indeterminate() {
    let base = serve_once("200 OK", "this is not json").await;
    let client = ApiClient::new(base);

    let outcome = client.fetch_profile("tok123", Some(1)).await;
    assert!(matches!(outcome, ProfileOutcome::Indeterminate(_)));
}

#[tokio::test]
async fn profile_fetch_network_failure_is_indeterminate() {
    let base = dead_endpoint().await;
    let client = ApiClient::new(base);

    let outcome = client.fetch_profile("tok123", Some(1)).await;
    assert!(matches!(outcome, ProfileOutcome::Indeterminate(_)));
}

#[tokio::test]
async fn login_rejection_is_invalid_credentials() {
    let base = serve_once("401 Unauthorized", r#"{"error":"bad password"}"#).await;
    let client = ApiClient::new(base);

    let result = client.login("a@example.com", "wrong").await;
    assert!(matches!(result, Err(SessionError::InvalidCredentials)));
}

#[tokio::test]
async fn sign_in_establishes_session_from_token() {
    let body: &'static str = r#"{"token":"header.eyJzdWIiOiI3In0.sig"}"#;
    let base = serve_once("200 OK", body).await;
    let controller = SessionController::new(MemoryStore::new(), ApiClient::new(base));

    let state = controller
        .sign_in("a@example.com", "secret123")
        .await
        .expect("sign in should succeed");

    // No embedded profile, so the session still needs resolution.
    assert_eq!(state, SessionState::Resolving);
    assert_eq!(controller.credential().user_id, Some(7));
}

#[tokio::test]
async fn create_profile_unauthorized_tears_the_session_down() {
    let base = serve_once("401 Unauthorized", "").await;
    let controller = SessionController::new(MemoryStore::new(), ApiClient::new(base));
    controller.login(&jwt_for_user(7), None).await;

    let result = controller.create_profile(&draft()).await;

    assert!(matches!(result, Err(SessionError::Unauthorized)));
    assert_eq!(controller.state(), SessionState::Anonymous);
    assert!(controller.credential().token.is_none());
}

#[tokio::test]
async fn create_profile_success_confirms_the_flag() {
    let base = serve_once("200 OK", PROFILE_BODY).await;
    let controller = SessionController::new(MemoryStore::new(), ApiClient::new(base));
    controller.login(&jwt_for_user(7), None).await;

    let profile = controller
        .create_profile(&draft())
        .await
        .expect("create profile should succeed");

    assert_eq!(profile.first_name, "Alex");
    assert_eq!(controller.state(), SessionState::AuthenticatedWithProfile);
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_any_request() {
    let base = dead_endpoint().await;
    let controller = SessionController::new(MemoryStore::new(), ApiClient::new(base));
    controller.login(&jwt_for_user(7), None).await;

    let mut bad = draft();
    bad.sports.clear();

    let result = controller.create_profile(&bad).await;
    assert!(matches!(result, Err(SessionError::BadRequest(_))));
    // Cached session state is untouched by the failed call.
    assert_eq!(controller.state(), SessionState::Resolving);
}
