use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::Result,
    middleware::AuthUser,
    state::AppState,
};

use super::{
    team_dto::{CreateTeamRequest, TeamInviteRequest, UpdateTeamNameRequest},
    team_models::{PendingRequestResponse, TeamRequest, TeamResponse},
};

/// Create a team with one invited member
#[utoipa::path(
    post,
    path = "/api/teams",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created successfully", body = TeamResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Invited user not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_team(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let team = state.team_service.create_team(user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// List teams the caller belongs to
#[utoipa::path(
    get,
    path = "/api/teams",
    tag = "teams",
    responses(
        (status = 200, description = "Teams retrieved successfully", body = Vec<TeamResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_teams(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse> {
    let teams = state.team_service.list_user_teams(user_id).await?;

    Ok((StatusCode::OK, Json(teams)))
}

/// Rename a team (members only)
#[utoipa::path(
    put,
    path = "/api/teams/{id}/name",
    tag = "teams",
    params(
        ("id" = Uuid, Path, description = "Team ID")
    ),
    request_body = UpdateTeamNameRequest,
    responses(
        (status = 200, description = "Team renamed successfully", body = TeamResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a member of this team"),
        (status = 404, description = "Team not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn rename_team(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(team_id): Path<Uuid>,
    Json(payload): Json<UpdateTeamNameRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let team = state
        .team_service
        .rename_team(team_id, user_id, &payload.name)
        .await?;

    Ok((StatusCode::OK, Json(team)))
}

/// Send a team request to another user
#[utoipa::path(
    post,
    path = "/api/teams/requests",
    tag = "teams",
    request_body = TeamInviteRequest,
    responses(
        (status = 201, description = "Request created", body = TeamRequest),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn send_team_request(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<TeamInviteRequest>,
) -> Result<impl IntoResponse> {
    let request = state
        .team_service
        .send_request(user_id, payload.receiver_id)
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// List pending team requests addressed to the caller
#[utoipa::path(
    get,
    path = "/api/teams/requests",
    tag = "teams",
    responses(
        (status = 200, description = "Pending requests", body = Vec<PendingRequestResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_pending_requests(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse> {
    let requests = state.team_service.pending_requests(user_id).await?;

    Ok((StatusCode::OK, Json(requests)))
}
