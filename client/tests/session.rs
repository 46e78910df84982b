mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chatgate_client::entities::{TokenKind, TokenPair, User};
use chatgate_client::store::SessionRecord;
use chatgate_client::{
    ApiClient, ClientConfig, MemoryTokenStore, Navigator, Route, SessionController,
    SessionState, TokenStore,
};
use common::{client, serve, user_json};
use serde_json::{Value, json};

fn alice() -> User {
    serde_json::from_value(user_json("1", "alice")).unwrap()
}

fn signed_in_store() -> Arc<MemoryTokenStore> {
    let store = Arc::new(MemoryTokenStore::new());
    store
        .set_pair(&TokenPair {
            access_token: "acc".into(),
            refresh_token: "ref".into(),
        })
        .unwrap();
    store.set_user(&alice()).unwrap();
    store
}

/// Porta chiusa: qualsiasi richiesta fallirebbe
fn offline_api(store: Arc<MemoryTokenStore>, verify_on_start: bool) -> ApiClient {
    let mut config = ClientConfig::for_base_url("http://127.0.0.1:9");
    config.storage_path = None;
    config.verify_on_start = verify_on_start;
    ApiClient::new(config, store as Arc<dyn TokenStore>, Navigator::default())
}

fn unauthorized_router() -> Router {
    Router::new().route(
        "/users",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid or expired token"})),
            )
        }),
    )
}

#[test]
fn starts_loading() {
    let session = SessionController::new(offline_api(signed_in_store(), false));
    assert_eq!(session.state(), SessionState::Loading);
}

#[test]
fn cached_user_is_trusted_without_a_round_trip() {
    let session = SessionController::new(offline_api(signed_in_store(), false));

    assert_eq!(session.init(), SessionState::Authenticated(alice()));
    assert_eq!(session.current_user(), Some(alice()));
    assert_eq!(session.api().navigator().current(), Route::Messenger);
}

#[test]
fn missing_user_signs_out_and_drops_tokens() {
    let store = Arc::new(MemoryTokenStore::new());
    store.set(TokenKind::Access, "orphan").unwrap();
    let session = SessionController::new(offline_api(store.clone(), false));

    assert_eq!(session.init(), SessionState::Unauthenticated);
    assert_eq!(store.record(), SessionRecord::default());
    assert_eq!(
        session.api().navigator().current(),
        Route::Auth { invite: None }
    );
}

#[test]
fn corrupt_user_record_signs_out() {
    let store = Arc::new(MemoryTokenStore::from_record(SessionRecord {
        access_token: Some("acc".into()),
        refresh_token: Some("ref".into()),
        current_user: Some("{\"id\": 1, oops".into()),
    }));
    let session = SessionController::new(offline_api(store.clone(), false));

    assert_eq!(session.init(), SessionState::Unauthenticated);
    assert_eq!(store.record(), SessionRecord::default());
}

#[test]
fn logout_is_idempotent() {
    let store = signed_in_store();
    let session = SessionController::new(offline_api(store.clone(), false));
    session.init();

    session.logout();
    let state_once = session.state();
    let record_once = store.record();
    let epoch_once = session.api().auth_epoch();

    session.logout();

    assert_eq!(state_once, SessionState::Unauthenticated);
    assert_eq!(session.state(), state_once);
    assert_eq!(store.record(), record_once);
    assert_eq!(record_once, SessionRecord::default());
    assert_eq!(session.api().auth_epoch(), epoch_once);
    assert_eq!(
        session.api().navigator().current(),
        Route::Auth { invite: None }
    );
}

#[tokio::test]
async fn unauthorized_response_is_seen_on_next_read() {
    let base = serve(unauthorized_router()).await;
    let c = client(&base);
    c.store.set_user(&alice()).unwrap();
    let session = SessionController::new(c.api.clone());
    session.init();

    assert!(c.api.list_users().await.unwrap_err().is_unauthenticated());

    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert_eq!(c.store.record(), SessionRecord::default());
}

#[tokio::test]
async fn stale_rejection_does_not_end_a_newer_session() {
    let router = unauthorized_router().route(
        "/auth",
        get(|| async { Json(json!({"user": user_json("1", "alice")})) }).post(
            |Json(body): Json<Value>| async move {
                Json(json!({
                    "accessToken": "new-acc",
                    "refreshToken": "new-ref",
                    "user": user_json("1", body["username"].as_str().unwrap_or("alice")),
                }))
            },
        ),
    );
    let base = serve(router).await;
    let c = client(&base);
    c.store.set_user(&alice()).unwrap();
    let session = SessionController::new(c.api.clone());
    session.init();

    // il 401 arriva ma nessuno legge lo stato prima del nuovo login
    assert!(c.api.list_users().await.is_err());
    session.login("alice", "password123").await.unwrap();

    assert_eq!(session.state(), SessionState::Authenticated(alice()));
    assert_eq!(
        c.store.get(TokenKind::Access).unwrap().as_deref(),
        Some("new-acc")
    );
}

#[tokio::test]
async fn verify_refreshes_the_cached_user() {
    let router = Router::new().route(
        "/auth",
        get(|| async {
            Json(json!({"user": {
                "id": "1",
                "username": "alice",
                "displayName": "Alice Liddell",
                "isAdmin": true,
            }}))
        }),
    );
    let base = serve(router).await;
    let c = client(&base);
    c.store.set_user(&alice()).unwrap();
    let session = SessionController::new(c.api.clone());
    session.init();

    let verified = session.verify().await.unwrap().unwrap();

    assert_eq!(verified.display_name, "Alice Liddell");
    assert_eq!(session.current_user(), Some(verified.clone()));
    assert_eq!(c.store.user().unwrap(), Some(verified));
}

#[tokio::test]
async fn verify_rejection_ends_the_session() {
    let router = Router::new().route(
        "/auth",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid or expired token"})),
            )
        }),
    );
    let base = serve(router).await;
    let c = client(&base);
    c.store.set_user(&alice()).unwrap();
    let session = SessionController::new(c.api.clone());
    session.init();

    assert!(session.verify().await.unwrap_err().is_unauthenticated());
    assert_eq!(session.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn verify_keeps_the_session_on_other_failures() {
    let session = SessionController::new(offline_api(signed_in_store(), true));
    session.init();

    let handle = session.spawn_verification().expect("verification enabled");
    assert!(handle.await.unwrap().is_err());

    assert_eq!(session.state(), SessionState::Authenticated(alice()));
}

#[tokio::test]
async fn background_verification_can_be_disabled() {
    let session = SessionController::new(offline_api(signed_in_store(), false));
    session.init();
    assert!(session.spawn_verification().is_none());
}
