mod common;

use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use chatgate_client::entities::{TokenKind, TokenPair, User};
use chatgate_client::store::SessionRecord;
use chatgate_client::{ApiError, AuthEvent, Route, TokenStore};
use common::{client, serve, user_json};
use serde_json::{Value, json};

fn seed_session(store: &dyn TokenStore) {
    store
        .set_pair(&TokenPair {
            access_token: "tok-1".into(),
            refresh_token: "ref-1".into(),
        })
        .unwrap();
    let user: User = serde_json::from_value(user_json("1", "alice")).unwrap();
    store.set_user(&user).unwrap();
}

#[tokio::test]
async fn unauthorized_clears_store_redirects_and_broadcasts() {
    let router = Router::new().route(
        "/users",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid or expired token"})),
            )
        }),
    );
    let base = serve(router).await;
    let c = client(&base);
    seed_session(c.store.as_ref());
    c.api.navigator().navigate(Route::Messenger);
    let mut events = c.api.subscribe_auth_events();

    let err = c.api.list_users().await.unwrap_err();

    assert!(err.is_unauthenticated());
    assert_eq!(c.store.record(), SessionRecord::default());
    assert_eq!(c.api.navigator().current(), Route::Auth { invite: None });
    assert_eq!(c.api.auth_epoch(), 1);
    assert_eq!(events.try_recv().unwrap(), AuthEvent::Unauthenticated { epoch: 1 });
}

#[tokio::test]
async fn rejected_requests_carry_the_server_message() {
    let router = Router::new()
        .route(
            "/invites",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"error": "Admin access required"})),
                )
            }),
        )
        .route(
            "/users",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
    let base = serve(router).await;
    let c = client(&base);
    seed_session(c.store.as_ref());

    match c.api.list_invites().await {
        Err(ApiError::RequestFailed { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Admin access required");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    match c.api.list_users().await {
        Err(ApiError::RequestFailed { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "Request failed");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    // solo il 401 tocca la sessione
    assert_eq!(c.store.get(TokenKind::Access).unwrap().as_deref(), Some("tok-1"));
    assert_eq!(c.api.auth_epoch(), 0);
}

#[tokio::test]
async fn bearer_token_and_json_body_are_sent() {
    let router = Router::new()
        .route(
            "/users",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if auth == "Bearer tok-1" {
                    (StatusCode::OK, Json(json!({"users": [user_json("2", "bob")]})))
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({"error": auth})))
                }
            }),
        )
        .route(
            "/chats",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["action"], "send_message");
                (
                    StatusCode::CREATED,
                    Json(json!({"message": common::message_json("9", "4", body["body"].as_str().unwrap())})),
                )
            }),
        );
    let base = serve(router).await;
    let c = client(&base);
    seed_session(c.store.as_ref());

    let users = c.api.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "bob");

    let message = c.api.send_message("4", "ciao").await.unwrap();
    assert_eq!(message.id, "9");
    assert_eq!(message.body, "ciao");
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let router = Router::new().route(
        "/users",
        get(|headers: HeaderMap| async move {
            if headers.contains_key(header::AUTHORIZATION) {
                (StatusCode::BAD_REQUEST, Json(json!({"error": "unexpected credentials"})))
            } else {
                (StatusCode::OK, Json(json!({"users": []})))
            }
        }),
    );
    let base = serve(router).await;
    let c = client(&base);

    assert!(c.api.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn init_calls_are_anonymous() {
    let router = Router::new().route(
        "/init",
        get(|headers: HeaderMap| async move {
            Json(json!({"initialized": headers.contains_key(header::AUTHORIZATION)}))
        })
        .post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "System is already initialized"})),
            )
        }),
    );
    let base = serve(router).await;
    let c = client(&base);
    seed_session(c.store.as_ref());

    let status = c.api.check_init().await.unwrap();
    assert!(!status.initialized);

    let err = c.api.bootstrap().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!err.is_unauthenticated());
    assert!(c.store.user().unwrap().is_some());
    assert_eq!(c.api.auth_epoch(), 0);
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let router = Router::new().route("/users", get(|| async { "definitely not json" }));
    let base = serve(router).await;
    let c = client(&base);

    assert!(matches!(c.api.list_users().await, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let c = client(&format!("http://{addr}"));

    assert!(matches!(c.api.list_users().await, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn login_persists_tokens_and_user() {
    let router = Router::new().route(
        "/auth",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["action"], "login");
            Json(json!({
                "accessToken": "acc",
                "refreshToken": "ref",
                "user": user_json("1", body["username"].as_str().unwrap()),
            }))
        }),
    );
    let base = serve(router).await;
    let c = client(&base);

    let auth = c.api.login("alice", "password123").await.unwrap();

    assert_eq!(auth.user.username, "alice");
    assert_eq!(c.store.get(TokenKind::Access).unwrap().as_deref(), Some("acc"));
    assert_eq!(c.store.get(TokenKind::Refresh).unwrap().as_deref(), Some("ref"));
    assert_eq!(c.store.user().unwrap(), Some(auth.user));
}
