use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A user the caller has exchanged at least one direct message with.
#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct DirectContact {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InboxKind {
    Direct,
    Team,
}

/// One conversation in the combined inbox: a direct counterpart or a team.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InboxEntry {
    pub id: Uuid,
    pub name: String,
    pub kind: InboxKind,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}
