//! UserRepository - Repository per la gestione degli utenti

use super::{Create, Read};
use crate::dtos::CreateUserDTO;
use crate::entities::User;
use chrono::{DateTime, Utc};
use sqlx::{Error, SqlitePool};

const USER_COLUMNS: &str =
    "id, username, display_name, password_hash, is_admin, created_at, last_seen";

// USER REPO
pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> UserRepository {
        Self { connection_pool }
    }

    /// considero l'username univoco (già normalizzato in minuscolo)
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.connection_pool)
            .await?;

        Ok(count)
    }

    /// Tutti gli utenti, ordinati per nome visualizzato
    pub async fn list_by_display_name(&self) -> Result<Vec<User>, Error> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY display_name COLLATE NOCASE ASC, id ASC"
        ))
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(users)
    }

    pub async fn touch_last_seen(&self, user_id: &i64, now: DateTime<Utc>) -> Result<(), Error> {
        sqlx::query("UPDATE users SET last_seen = ? WHERE id = ?")
            .bind(now)
            .bind(user_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }

    /// Crea l'utente consumando un uso dell'invito, tutto in un'unica transazione.
    ///
    /// Il primo utente registrato diventa amministratore. Ritorna `Ok(None)` se
    /// nel frattempo l'invito è stato esaurito o revocato (nessuna scrittura).
    pub async fn create_with_invite(
        &self,
        data: &CreateUserDTO,
        invite_id: &i64,
    ) -> Result<Option<User>, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let consumed = sqlx::query(
            "UPDATE invites SET used_count = used_count + 1 \
             WHERE id = ? AND used_count < max_uses AND revoked_at IS NULL",
        )
        .bind(invite_id)
        .execute(&mut *tx)
        .await?;

        if consumed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;

        let result = sqlx::query(
            "INSERT INTO users (username, display_name, password_hash, is_admin, created_at, last_seen) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.username)
        .bind(&data.display_name)
        .bind(&data.password_hash)
        .bind(existing == 0)
        .bind(data.created_at)
        .bind(data.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(User {
            id: result.last_insert_rowid(),
            username: data.username.clone(),
            display_name: data.display_name.clone(),
            password_hash: data.password_hash.clone(),
            is_admin: existing == 0,
            created_at: data.created_at,
            last_seen: Some(data.created_at),
        }))
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        let result = sqlx::query(
            "INSERT INTO users (username, display_name, password_hash, is_admin, created_at) \
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(&data.username)
        .bind(&data.display_name)
        .bind(&data.password_hash)
        .bind(data.created_at)
        .execute(&self.connection_pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: data.username.clone(),
            display_name: data.display_name.clone(),
            password_hash: data.password_hash.clone(),
            is_admin: false,
            created_at: data.created_at,
            last_seen: None,
        })
    }
}

impl Read<User, i64> for UserRepository {
    async fn read(&self, id: &i64) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}
