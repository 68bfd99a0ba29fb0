use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Result,
    middleware::AuthUser,
    state::AppState,
    message::message_dto::{DirectContact, InboxEntry, PaginatedResponse},
};

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

const DEFAULT_PAGE_LIMIT: u32 = 200;

fn paginate(query: &MessageQuery) -> (u32, u32, i64) {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, 1000);
    let offset = ((page - 1) * limit) as i64;
    (page, limit, offset)
}

/// Get direct-message history with another user
#[utoipa::path(
    get,
    path = "/api/messages/direct/{user_id}",
    tag = "messages",
    params(
        ("user_id" = Uuid, Path, description = "Counterpart user ID"),
        ("page" = Option<u32>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u32>, Query, description = "Items per page (default: 200)")
    ),
    responses(
        (status = 200, description = "Ordered conversation messages"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_direct_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(other_user_id): Path<Uuid>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let (page, limit, offset) = paginate(&query);

    let (messages, total) = state
        .message_service
        .direct_history(user_id, other_user_id, limit as i64, offset)
        .await?;

    let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;

    let response = PaginatedResponse {
        data: messages,
        total,
        page,
        limit,
        total_pages,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Get team chat history
#[utoipa::path(
    get,
    path = "/api/messages/team/{team_id}",
    tag = "messages",
    params(
        ("team_id" = Uuid, Path, description = "Team ID"),
        ("page" = Option<u32>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u32>, Query, description = "Items per page (default: 200)")
    ),
    responses(
        (status = 200, description = "Ordered team messages"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a member of this team"),
        (status = 404, description = "Team not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_team_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(team_id): Path<Uuid>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let (page, limit, offset) = paginate(&query);

    let (messages, total) = state
        .message_service
        .team_history(user_id, team_id, limit as i64, offset)
        .await?;

    let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;

    let response = PaginatedResponse {
        data: messages,
        total,
        page,
        limit,
        total_pages,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// List distinct direct-message counterparts
#[utoipa::path(
    get,
    path = "/api/messages/contacts",
    tag = "messages",
    responses(
        (status = 200, description = "Direct-message contacts", body = Vec<DirectContact>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_contacts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse> {
    let contacts = state.message_service.direct_contacts(user_id).await?;

    Ok((StatusCode::OK, Json(contacts)))
}

/// Combined inbox: direct conversations first, then team conversations
#[utoipa::path(
    get,
    path = "/api/messages/inbox",
    tag = "messages",
    responses(
        (status = 200, description = "Inbox entries", body = Vec<InboxEntry>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_inbox(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse> {
    let inbox = state.message_service.inbox(user_id).await?;

    Ok((StatusCode::OK, Json(inbox)))
}
