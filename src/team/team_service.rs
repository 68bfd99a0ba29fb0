use crate::error::{AppError, Result};
use crate::sanitize;
use crate::user::user_repository::UserRepository;
use crate::websocket::{
    types::{TeamJoinedPayload, TeamNameUpdatedPayload, WsMessage},
    GroupKey, RoomRouter,
};
use uuid::Uuid;

use super::team_dto::CreateTeamRequest;
use super::team_models::{PendingRequestResponse, TeamRequest, TeamResponse};

#[derive(Clone)]
pub struct TeamService {
    repo: super::team_repository::TeamRepository,
    user_repo: UserRepository,
    router: RoomRouter,
}

impl TeamService {
    pub fn new(
        repo: super::team_repository::TeamRepository,
        user_repo: UserRepository,
        router: RoomRouter,
    ) -> Self {
        Self {
            repo,
            user_repo,
            router,
        }
    }

    /// Create a team with the creator and exactly one invited member.
    ///
    /// The team row and both membership rows commit in one transaction; the
    /// `team_joined` event goes out only after the commit.
    pub async fn create_team(
        &self,
        creator_id: Uuid,
        payload: CreateTeamRequest,
    ) -> Result<TeamResponse> {
        let name = sanitize::clean_team_name(&payload.name);
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Team name is empty".to_string()));
        }

        if payload.member_id == creator_id {
            return Err(AppError::BadRequest(
                "Cannot form a team with yourself".to_string(),
            ));
        }

        self.user_repo
            .find_by_id(payload.member_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invited user not found".to_string()))?;

        let team = self
            .repo
            .create_with_members(&name, creator_id, payload.member_id)
            .await?;

        let event = WsMessage::TeamJoined(TeamJoinedPayload { team_id: team.id });
        self.router.broadcast(&GroupKey::team(team.id), event.clone());
        self.router.send_to_user(&creator_id, event.clone());
        self.router.send_to_user(&payload.member_id, event);

        let mut response: TeamResponse = team.into();
        response.member_count = Some(2);

        Ok(response)
    }

    /// Rename a team. Restricted to current members.
    pub async fn rename_team(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        new_name: &str,
    ) -> Result<TeamResponse> {
        self.verify_membership(team_id, user_id).await?;

        let name = sanitize::clean_team_name(new_name);
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Team name is empty".to_string()));
        }

        let team = self.repo.rename(team_id, &name).await?;

        self.router.broadcast(
            &GroupKey::team(team_id),
            WsMessage::TeamNameUpdated(TeamNameUpdatedPayload {
                team_id,
                name: team.name.clone(),
            }),
        );

        let member_count = self.repo.get_member_count(team_id).await?;
        let mut response: TeamResponse = team.into();
        response.member_count = Some(member_count);

        Ok(response)
    }

    pub async fn list_user_teams(&self, user_id: Uuid) -> Result<Vec<TeamResponse>> {
        let teams = self.repo.find_user_teams(user_id).await?;

        let mut responses = Vec::with_capacity(teams.len());
        for team in teams {
            let member_count = self.repo.get_member_count(team.id).await?;
            let mut response: TeamResponse = team.into();
            response.member_count = Some(member_count);
            responses.push(response);
        }

        Ok(responses)
    }

    /// Raw team rows for the user's memberships, for inbox assembly.
    pub async fn member_teams(&self, user_id: Uuid) -> Result<Vec<crate::team::team_models::Team>> {
        self.repo.find_user_teams(user_id).await
    }

    /// NotFound for a nonexistent team, Forbidden for a non-member.
    pub async fn verify_membership(&self, team_id: Uuid, user_id: Uuid) -> Result<()> {
        self.repo
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;

        if !self.repo.is_member(team_id, user_id).await? {
            return Err(AppError::Forbidden(
                "You are not a member of this team".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn shared_team(&self, user_a: Uuid, user_b: Uuid) -> Result<bool> {
        self.repo.shared_team(user_a, user_b).await
    }

    /// Record a pending team request. No accept/reject transition exists;
    /// requests only drive the pending-invite display.
    pub async fn send_request(&self, sender_id: Uuid, receiver_id: Uuid) -> Result<TeamRequest> {
        if receiver_id == sender_id {
            return Err(AppError::BadRequest(
                "Cannot send a team request to yourself".to_string(),
            ));
        }

        self.user_repo
            .find_by_id(receiver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.repo.create_request(sender_id, receiver_id).await
    }

    pub async fn pending_requests(&self, user_id: Uuid) -> Result<Vec<PendingRequestResponse>> {
        self.repo.find_pending_requests(user_id).await
    }
}
