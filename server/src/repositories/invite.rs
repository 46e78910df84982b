//! InviteRepository - Repository per la gestione degli inviti di registrazione

use super::{Create, Read};
use crate::dtos::CreateInviteDTO;
use crate::entities::{Invite, User};
use chrono::{DateTime, Utc};
use sqlx::{Error, FromRow, SqlitePool};

const INVITE_COLUMNS: &str =
    "id, token, created_by_user_id, created_at, expires_at, max_uses, used_count, revoked_at";

/// Riga della lista inviti: invito + creatore (JOIN su users)
#[derive(Debug, Clone, FromRow)]
pub struct InviteWithCreator {
    #[sqlx(flatten)]
    pub invite: Invite,
    pub creator_id: i64,
    pub creator_username: String,
    pub creator_display_name: String,
    pub creator_password_hash: String,
    pub creator_is_admin: bool,
    pub creator_created_at: DateTime<Utc>,
    pub creator_last_seen: Option<DateTime<Utc>>,
}

impl InviteWithCreator {
    pub fn into_parts(self) -> (Invite, User) {
        let creator = User {
            id: self.creator_id,
            username: self.creator_username,
            display_name: self.creator_display_name,
            password_hash: self.creator_password_hash,
            is_admin: self.creator_is_admin,
            created_at: self.creator_created_at,
            last_seen: self.creator_last_seen,
        };
        (self.invite, creator)
    }
}

//INVITE REPOSITORY
pub struct InviteRepository {
    connection_pool: SqlitePool,
}

impl InviteRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<Invite>, Error> {
        let invite = sqlx::query_as::<_, Invite>(&format!(
            "SELECT {INVITE_COLUMNS} FROM invites WHERE token = ?"
        ))
        .bind(token)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(invite)
    }

    /// Inviti con creatore, dal più recente. L'invito di bootstrap (senza creatore) non compare.
    pub async fn find_many_with_creator(&self) -> Result<Vec<InviteWithCreator>, Error> {
        let invites = sqlx::query_as::<_, InviteWithCreator>(
            r#"
            SELECT
                i.id, i.token, i.created_by_user_id, i.created_at, i.expires_at,
                i.max_uses, i.used_count, i.revoked_at,
                u.id AS creator_id,
                u.username AS creator_username,
                u.display_name AS creator_display_name,
                u.password_hash AS creator_password_hash,
                u.is_admin AS creator_is_admin,
                u.created_at AS creator_created_at,
                u.last_seen AS creator_last_seen
            FROM invites i
            JOIN users u ON i.created_by_user_id = u.id
            ORDER BY i.created_at DESC, i.id DESC
            "#,
        )
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(invites)
    }

    /// Revoca un invito non ancora revocato; `false` se inesistente o già revocato
    pub async fn revoke(&self, id: &i64, now: DateTime<Utc>) -> Result<bool, Error> {
        let result =
            sqlx::query("UPDATE invites SET revoked_at = ? WHERE id = ? AND revoked_at IS NULL")
                .bind(now)
                .bind(id)
                .execute(&self.connection_pool)
                .await?;

        Ok(result.rows_affected() == 1)
    }
}

impl Create<Invite, CreateInviteDTO> for InviteRepository {
    async fn create(&self, data: &CreateInviteDTO) -> Result<Invite, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO invites (token, created_by_user_id, created_at, expires_at, max_uses, used_count)
            VALUES (?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(&data.token)
        .bind(data.created_by_user_id)
        .bind(data.created_at)
        .bind(data.expires_at)
        .bind(data.max_uses)
        .execute(&self.connection_pool)
        .await?;

        Ok(Invite {
            id: result.last_insert_rowid(),
            token: data.token.clone(),
            created_by_user_id: data.created_by_user_id,
            created_at: data.created_at,
            expires_at: data.expires_at,
            max_uses: data.max_uses,
            used_count: 0,
            revoked_at: None,
        })
    }
}

impl Read<Invite, i64> for InviteRepository {
    async fn read(&self, id: &i64) -> Result<Option<Invite>, Error> {
        let invite = sqlx::query_as::<_, Invite>(&format!(
            "SELECT {INVITE_COLUMNS} FROM invites WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(invite)
    }
}
