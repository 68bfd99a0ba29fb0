use crate::{
    error::Result,
    message::{
        message_dto::DirectContact,
        message_models::{Message, MessageWithSender},
    },
};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_direct(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: &str,
    ) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (sender_id, receiver_id, content)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    pub async fn create_team(
        &self,
        sender_id: Uuid,
        team_id: Uuid,
        content: &str,
    ) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (sender_id, team_id, content)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(sender_id)
        .bind(team_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    /// The direct conversation between two users, ascending creation order.
    ///
    /// The WHERE clause is symmetric in the two users, so both participants
    /// read back the identical sequence.
    pub async fn find_direct_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MessageWithSender>> {
        let messages = sqlx::query_as::<_, MessageWithSender>(
            "SELECT m.id, m.sender_id, u.name AS sender_name, m.content, m.created_at
             FROM messages m
             INNER JOIN users u ON u.id = m.sender_id
             WHERE ((m.sender_id = $1 AND m.receiver_id = $2)
                OR (m.sender_id = $2 AND m.receiver_id = $1))
             AND m.team_id IS NULL
             ORDER BY m.created_at, m.id
             LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(other_user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn count_direct_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages
             WHERE ((sender_id = $1 AND receiver_id = $2)
                OR (sender_id = $2 AND receiver_id = $1))
             AND team_id IS NULL",
        )
        .bind(user_id)
        .bind(other_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn find_team_messages(
        &self,
        team_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MessageWithSender>> {
        let messages = sqlx::query_as::<_, MessageWithSender>(
            "SELECT m.id, m.sender_id, u.name AS sender_name, m.content, m.created_at
             FROM messages m
             INNER JOIN users u ON u.id = m.sender_id
             WHERE m.team_id = $1
             ORDER BY m.created_at, m.id
             LIMIT $2 OFFSET $3",
        )
        .bind(team_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn count_team_messages(&self, team_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE team_id = $1")
            .bind(team_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Every distinct user the given user has exchanged a direct message
    /// with, in either direction.
    pub async fn find_direct_contacts(&self, user_id: Uuid) -> Result<Vec<DirectContact>> {
        let contacts = sqlx::query_as::<_, DirectContact>(
            "SELECT DISTINCT u.id, u.name
             FROM users u
             INNER JOIN messages m
                ON (u.id = m.sender_id AND m.receiver_id = $1)
                OR (u.id = m.receiver_id AND m.sender_id = $1)
             WHERE u.id != $1 AND m.team_id IS NULL
             ORDER BY u.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }
}
