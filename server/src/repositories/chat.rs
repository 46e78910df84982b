//! ChatRepository - Repository per la gestione delle chat dirette e dei membri

use super::Read;
use crate::entities::{Chat, ChatType, User};
use chrono::{DateTime, Utc};
use sqlx::{Error, SqlitePool};

// CHAT REPO
pub struct ChatRepository {
    connection_pool: SqlitePool,
}

impl ChatRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Chat di cui l'utente è membro, dalla più recente
    pub async fn find_many_by_member(&self, user_id: &i64) -> Result<Vec<Chat>, Error> {
        let chats = sqlx::query_as::<_, Chat>(
            r#"
            SELECT c.id, c.chat_type, c.created_at
            FROM chats c
            JOIN chat_members cm ON cm.chat_id = c.id
            WHERE cm.user_id = ?
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(chats)
    }

    pub async fn find_participants(&self, chat_id: &i64) -> Result<Vec<User>, Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.display_name, u.password_hash, u.is_admin, u.created_at, u.last_seen
            FROM users u
            JOIN chat_members cm ON cm.user_id = u.id
            WHERE cm.chat_id = ?
            ORDER BY u.id ASC
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(users)
    }

    pub async fn is_member(&self, chat_id: &i64, user_id: &i64) -> Result<bool, Error> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT user_id FROM chat_members WHERE chat_id = ? AND user_id = ?",
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(found.is_some())
    }

    /// Chat diretta già esistente tra i due utenti, se presente
    pub async fn find_direct_between(
        &self,
        first_user: &i64,
        second_user: &i64,
    ) -> Result<Option<Chat>, Error> {
        let chat = sqlx::query_as::<_, Chat>(
            r#"
            SELECT c.id, c.chat_type, c.created_at
            FROM chats c
            JOIN chat_members cm1 ON cm1.chat_id = c.id
            JOIN chat_members cm2 ON cm2.chat_id = c.id
            WHERE cm1.user_id = ? AND cm2.user_id = ? AND c.chat_type = ?
            LIMIT 1
            "#,
        )
        .bind(first_user)
        .bind(second_user)
        .bind(ChatType::Direct)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(chat)
    }

    /// Crea la chat e i due membri in un'unica transazione
    pub async fn create_direct(
        &self,
        first_user: &i64,
        second_user: &i64,
        now: DateTime<Utc>,
    ) -> Result<Chat, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let result = sqlx::query("INSERT INTO chats (chat_type, created_at) VALUES (?, ?)")
            .bind(ChatType::Direct)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        let chat_id = result.last_insert_rowid();

        sqlx::query("INSERT INTO chat_members (chat_id, user_id) VALUES (?, ?), (?, ?)")
            .bind(chat_id)
            .bind(first_user)
            .bind(chat_id)
            .bind(second_user)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Chat {
            id: chat_id,
            chat_type: ChatType::Direct,
            created_at: now,
        })
    }
}

impl Read<Chat, i64> for ChatRepository {
    async fn read(&self, id: &i64) -> Result<Option<Chat>, Error> {
        let chat = sqlx::query_as::<_, Chat>(
            "SELECT id, chat_type, created_at FROM chats WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(chat)
    }
}
