//! Integration tests per l'endpoint /invites (solo amministratori)

mod common;

#[cfg(test)]
mod invite_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use chrono::{DateTime, Duration, Utc};
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let app = spawn_app().await;
        let bob = seed_user(&app, "bob", "Bob", false).await;
        let token = access_token(&app, bob.id);

        let response = app
            .server
            .get("/invites")
            .add_header(auth_header(), bearer(&token))
            .await;
        response.assert_status_forbidden();

        let response = app
            .server
            .post("/invites")
            .add_header(auth_header(), bearer(&token))
            .json(&json!({}))
            .await;
        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_create_invite_with_defaults() {
        let app = spawn_app().await;
        let admin = seed_user(&app, "admin", "Admin", true).await;
        let before = Utc::now();

        let response = app
            .server
            .post("/invites")
            .add_header(auth_header(), bearer(&access_token(&app, admin.id)))
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        let invite = &body["invite"];
        assert_eq!(invite["maxUses"], 1);
        assert_eq!(invite["usedCount"], 0);
        assert_eq!(invite["token"].as_str().map(str::len), Some(22));

        let expires_at: DateTime<Utc> = invite["expiresAt"]
            .as_str()
            .expect("expiresAt")
            .parse()
            .expect("RFC 3339 timestamp");
        assert!(expires_at >= before + Duration::days(7));
        assert!(expires_at <= Utc::now() + Duration::days(7));
    }

    #[tokio::test]
    async fn test_create_invite_rejects_zero_uses() {
        let app = spawn_app().await;
        let admin = seed_user(&app, "admin", "Admin", true).await;

        let response = app
            .server
            .post("/invites")
            .add_header(auth_header(), bearer(&access_token(&app, admin.id)))
            .json(&json!({ "maxUses": 0, "daysValid": 3 }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_list_invites_newest_first_with_creator() {
        let app = spawn_app().await;
        let admin = seed_user(&app, "admin", "Admin", true).await;
        // l'invito di bootstrap non ha creatore e non compare
        seed_invite(&app, None, 1, Duration::days(30)).await;
        let older = seed_invite(&app, Some(admin.id), 1, Duration::days(1)).await;
        let newer = seed_invite(&app, Some(admin.id), 3, Duration::days(2)).await;

        let response = app
            .server
            .get("/invites")
            .add_header(auth_header(), bearer(&access_token(&app, admin.id)))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let invites = body["invites"].as_array().expect("invites");
        assert_eq!(invites.len(), 2);
        assert_eq!(invites[0]["id"], newer.id.to_string());
        assert_eq!(invites[1]["id"], older.id.to_string());
        assert_eq!(invites[0]["createdBy"]["username"], "admin");
        assert!(invites[0]["revokedAt"].is_null());
    }

    #[tokio::test]
    async fn test_revoke_invite() {
        let app = spawn_app().await;
        let admin = seed_user(&app, "admin", "Admin", true).await;
        let token = access_token(&app, admin.id);
        let invite = seed_invite(&app, Some(admin.id), 1, Duration::days(1)).await;

        let response = app
            .server
            .delete("/invites")
            .add_header(auth_header(), bearer(&token))
            .json(&json!({ "inviteId": invite.id.to_string() }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);

        // una seconda revoca non trova nulla da revocare
        let response = app
            .server
            .delete("/invites")
            .add_header(auth_header(), bearer(&token))
            .json(&json!({ "inviteId": invite.id }))
            .await;
        response.assert_status_not_found();

        let response = app
            .server
            .get("/invites")
            .add_header(auth_header(), bearer(&token))
            .await;
        let body: Value = response.json();
        assert!(body["invites"][0]["revokedAt"].is_string());
    }

    #[tokio::test]
    async fn test_revoke_without_id() {
        let app = spawn_app().await;
        let admin = seed_user(&app, "admin", "Admin", true).await;

        let response = app
            .server
            .delete("/invites")
            .add_header(auth_header(), bearer(&access_token(&app, admin.id)))
            .json(&json!({}))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["error"], "inviteId is required");
    }

    #[tokio::test]
    async fn test_created_invite_allows_registration() {
        let app = spawn_app().await;
        let admin = seed_user(&app, "admin", "Admin", true).await;

        let response = app
            .server
            .post("/invites")
            .add_header(auth_header(), bearer(&access_token(&app, admin.id)))
            .json(&json!({ "maxUses": 2, "daysValid": 1 }))
            .await;
        let body: Value = response.json();
        let invite_token = body["invite"]["token"].as_str().expect("token").to_string();

        let response = app
            .server
            .post("/auth")
            .json(&json!({
                "action": "register",
                "username": "newcomer",
                "displayName": "New Comer",
                "password": "secret123",
                "inviteToken": invite_token,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let stored = app
            .state
            .invite
            .find_by_token(&invite_token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.used_count, 1);
        assert_eq!(stored.max_uses, 2);
    }
}
