//! MessageRepository - Repository per la gestione dei messaggi

use super::Create;
use crate::dtos::CreateMessageDTO;
use crate::entities::Message;
use chrono::{DateTime, Utc};
use sqlx::{Error, SqlitePool};

// MESSAGE REPO
pub struct MessageRepository {
    connection_pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Get all messages for a specific chat, in arrival order
    pub async fn find_many_by_chat_id(&self, chat_id: &i64) -> Result<Vec<Message>, Error> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, chat_id, sender_id, body, created_at, read_at
            FROM messages
            WHERE chat_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(messages)
    }

    pub async fn find_last_by_chat_id(&self, chat_id: &i64) -> Result<Option<Message>, Error> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, chat_id, sender_id, body, created_at, read_at
            FROM messages
            WHERE chat_id = ?
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(chat_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(message)
    }

    /// Messaggi degli altri membri non ancora letti da `reader_id`
    pub async fn count_unread(&self, chat_id: &i64, reader_id: &i64) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE chat_id = ? AND sender_id != ? AND read_at IS NULL",
        )
        .bind(chat_id)
        .bind(reader_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(count)
    }

    /// Segna come letti i messaggi ricevuti da `reader_id`; solo sent -> read, mai il contrario
    pub async fn mark_read(
        &self,
        chat_id: &i64,
        reader_id: &i64,
        now: DateTime<Utc>,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            "UPDATE messages SET read_at = ? WHERE chat_id = ? AND sender_id != ? AND read_at IS NULL",
        )
        .bind(now)
        .bind(chat_id)
        .bind(reader_id)
        .execute(&self.connection_pool)
        .await?;

        Ok(result.rows_affected())
    }
}

impl Create<Message, CreateMessageDTO> for MessageRepository {
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        let result = sqlx::query(
            "INSERT INTO messages (chat_id, sender_id, body, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(data.chat_id)
        .bind(data.sender_id)
        .bind(&data.body)
        .bind(data.created_at)
        .execute(&self.connection_pool)
        .await?;

        Ok(Message {
            id: result.last_insert_rowid(),
            chat_id: data.chat_id,
            sender_id: data.sender_id,
            body: data.body.clone(),
            created_at: data.created_at,
            read_at: None,
        })
    }
}
