#![allow(dead_code)]

use axum_test::TestServer;
use axum_test::http::HeaderName;
use chatgate_server::core::{AppState, issue_tokens};
use chatgate_server::db;
use chatgate_server::dtos::CreateInviteDTO;
use chatgate_server::entities::{Invite, User};
use chatgate_server::repositories::Create;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

static INVITE_SEQ: AtomicUsize = AtomicUsize::new(0);

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Server di test con il suo stato e il pool SQLite in memoria
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub pool: SqlitePool,
}

/// Crea un database in memoria, applica le migrazioni e avvia un TestServer
pub async fn spawn_app() -> TestApp {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    let state = Arc::new(AppState::new(pool.clone(), JWT_SECRET.to_string()));
    let app = chatgate_server::create_router(state.clone());
    let server = TestServer::new(app).expect("Failed to create test server");
    TestApp {
        server,
        state,
        pool,
    }
}

/// Inserisce un utente direttamente nel database (bcrypt a costo minimo)
pub async fn seed_user(app: &TestApp, username: &str, display_name: &str, is_admin: bool) -> User {
    let password_hash = bcrypt::hash("password123", 4).expect("hash");
    sqlx::query(
        "INSERT INTO users (username, display_name, password_hash, is_admin, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(username)
    .bind(display_name)
    .bind(password_hash)
    .bind(is_admin)
    .bind(Utc::now())
    .execute(&app.pool)
    .await
    .expect("Failed to insert user");

    app.state
        .user
        .find_by_username(username)
        .await
        .expect("query")
        .expect("seeded user")
}

/// Crea un invito che scade tra `valid_for`
pub async fn seed_invite(
    app: &TestApp,
    created_by: Option<i64>,
    max_uses: i64,
    valid_for: Duration,
) -> Invite {
    let now = Utc::now();
    app.state
        .invite
        .create(&CreateInviteDTO {
            token: format!("seeded-invite-{}", INVITE_SEQ.fetch_add(1, Ordering::SeqCst)),
            created_by_user_id: created_by,
            created_at: now,
            expires_at: now + valid_for,
            max_uses,
        })
        .await
        .expect("Failed to insert invite")
}

/// Access token valido per l'utente
pub fn access_token(app: &TestApp, user_id: i64) -> String {
    issue_tokens(&app.state, user_id).expect("tokens").0
}

/// Refresh token valido per l'utente (non deve aprire le rotte protette)
pub fn refresh_token(app: &TestApp, user_id: i64) -> String {
    issue_tokens(&app.state, user_id).expect("tokens").1
}

/// Nome dell'header letto dal middleware di autenticazione
pub fn auth_header() -> HeaderName {
    HeaderName::from_static("authorization")
}

/// Valore dell'header Authorization per il token
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
