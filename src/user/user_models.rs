use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub city: String,
    pub contact: Option<String>,
    pub experience: Option<String>,
    pub projects: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub city: String,
    pub contact: Option<String>,
    pub experience: Option<String>,
    pub projects: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            city: user.city,
            contact: user.contact,
            experience: user.experience,
            projects: user.projects,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

/// One entry in the crew browse list: another user, annotated with whether
/// the viewer already shares a team with them.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CrewMemberResponse {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub city: String,
    pub experience: Option<String>,
    pub projects: Option<String>,
    pub contact: Option<String>,
    pub avatar_url: Option<String>,
    pub in_same_team: bool,
}

impl CrewMemberResponse {
    pub fn from_user(user: User, in_same_team: bool) -> Self {
        Self {
            id: user.id,
            name: user.name,
            role: user.role,
            city: user.city,
            experience: user.experience,
            projects: user.projects,
            contact: user.contact,
            avatar_url: user.avatar_url,
            in_same_team,
        }
    }
}
