use crate::auth::auth_dto::RegisterRequest;
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

use super::user_models::User;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: &RegisterRequest, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role, city, contact, experience, projects, avatar_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(password_hash)
        .bind(&payload.role)
        .bind(&payload.city)
        .bind(&payload.contact)
        .bind(&payload.experience)
        .bind(&payload.projects)
        .bind(&payload.avatar_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// All users except the one browsing, for the crew list.
    pub async fn find_others(&self, user_id: Uuid) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id != $1 ORDER BY name, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: &str,
        role: &str,
        city: &str,
        contact: Option<&str>,
        experience: Option<&str>,
        projects: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET name = $1,
                 role = $2,
                 city = $3,
                 contact = $4,
                 experience = $5,
                 projects = $6,
                 avatar_url = COALESCE($7, avatar_url),
                 updated_at = NOW()
             WHERE id = $8
             RETURNING *",
        )
        .bind(name)
        .bind(role)
        .bind(city)
        .bind(contact)
        .bind(experience)
        .bind(projects)
        .bind(avatar_url)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
