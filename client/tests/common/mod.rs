#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chatgate_client::{ApiClient, ClientConfig, MemoryTokenStore, Navigator, TokenStore};
use chatgate_server::{AppState, db};
use tokio::net::TcpListener;

pub const JWT_SECRET: &str = "segreto-di-test-per-il-client-chatgate";

/// Client collegato a un server, con il suo archivio in memoria
pub struct TestClient {
    pub api: ApiClient,
    pub store: Arc<MemoryTokenStore>,
    pub base_url: String,
}

/// Serve `router` su una porta libera e restituisce l'URL base
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}")
}

/// Avvia il vero server chatgate su SQLite in memoria
pub async fn spawn_server() -> String {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    let state = Arc::new(AppState::new(pool, JWT_SECRET.to_string()));
    serve(chatgate_server::create_router(state)).await
}

pub fn client(base_url: &str) -> TestClient {
    let store = Arc::new(MemoryTokenStore::new());
    let mut config = ClientConfig::for_base_url(base_url);
    config.storage_path = None;
    config.verify_on_start = false;
    let api = ApiClient::new(
        config,
        store.clone() as Arc<dyn TokenStore>,
        Navigator::default(),
    );
    TestClient {
        api,
        store,
        base_url: base_url.to_string(),
    }
}

/// JSON di un utente come lo restituisce il server
pub fn user_json(id: &str, username: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "username": username,
        "displayName": username.to_uppercase(),
        "isAdmin": false,
    })
}

pub fn message_json(id: &str, chat_id: &str, body: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "chatId": chat_id,
        "senderId": "1",
        "body": body,
        "createdAt": "2024-05-01T10:00:00Z",
        "status": "sent",
    })
}
