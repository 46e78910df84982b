//! Integration tests per l'endpoint /users

mod common;

#[cfg(test)]
mod user_tests {
    use super::common::*;
    use chrono::{Duration, Utc};
    use serde_json::Value;

    #[tokio::test]
    async fn test_list_users_ordered_by_display_name() {
        let app = spawn_app().await;
        let zed = seed_user(&app, "zed", "Zed", true).await;
        seed_user(&app, "anna", "anna", false).await;
        seed_user(&app, "bruno", "Bruno", false).await;

        let response = app
            .server
            .get("/users")
            .add_header(auth_header(), bearer(&access_token(&app, zed.id)))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let names: Vec<&str> = body["users"]
            .as_array()
            .expect("users")
            .iter()
            .filter_map(|u| u["displayName"].as_str())
            .collect();
        assert_eq!(names, vec!["anna", "Bruno", "Zed"]);
        assert!(body["users"][0].get("passwordHash").is_none());
        assert!(body["users"][0].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_online_flag_follows_last_seen() {
        let app = spawn_app().await;
        let alice = seed_user(&app, "alice", "Alice", true).await;
        let bob = seed_user(&app, "bob", "Bob", false).await;
        app.state
            .user
            .touch_last_seen(&alice.id, Utc::now())
            .await
            .unwrap();
        app.state
            .user
            .touch_last_seen(&bob.id, Utc::now() - Duration::minutes(10))
            .await
            .unwrap();

        let response = app
            .server
            .get("/users")
            .add_header(auth_header(), bearer(&access_token(&app, alice.id)))
            .await;

        let body: Value = response.json();
        let users = body["users"].as_array().expect("users");
        assert_eq!(users[0]["username"], "alice");
        assert_eq!(users[0]["isOnline"], true);
        assert_eq!(users[1]["username"], "bob");
        assert_eq!(users[1]["isOnline"], false);
    }

    #[tokio::test]
    async fn test_list_users_without_token() {
        let app = spawn_app().await;

        let response = app.server.get("/users").await;

        response.assert_status_unauthorized();
    }
}
