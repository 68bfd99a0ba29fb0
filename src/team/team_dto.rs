use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1))]
    pub name: String,
    /// The one other user invited into the new team.
    pub member_id: Uuid,
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamNameRequest {
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct TeamInviteRequest {
    pub receiver_id: Uuid,
}
