use crate::{
    error::{AppError, Result},
    team::team_repository::TeamRepository,
    user::{
        user_dto::UpdateProfileRequest,
        user_models::{CrewMemberResponse, UserResponse},
        user_repository::UserRepository,
    },
};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
    team_repository: TeamRepository,
}

impl UserService {
    pub fn new(user_repository: UserRepository, team_repository: TeamRepository) -> Self {
        Self {
            user_repository,
            team_repository,
        }
    }

    pub async fn get_current_user(&self, user_id: Uuid) -> Result<UserResponse> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<UserResponse> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    /// Every other registered user, annotated with whether the viewer
    /// already shares a team with them.
    pub async fn list_crew(&self, viewer_id: Uuid) -> Result<Vec<CrewMemberResponse>> {
        let others = self.user_repository.find_others(viewer_id).await?;

        let mut crew = Vec::with_capacity(others.len());
        for user in others {
            let in_same_team = self.team_repository.shared_team(viewer_id, user.id).await?;
            crew.push(CrewMemberResponse::from_user(user, in_same_team));
        }

        Ok(crew)
    }

    pub async fn update_current_user(
        &self,
        user_id: Uuid,
        payload: UpdateProfileRequest,
    ) -> Result<UserResponse> {
        let user = self
            .user_repository
            .update_profile(
                user_id,
                &payload.name,
                &payload.role,
                &payload.city,
                payload.contact.as_deref(),
                payload.experience.as_deref(),
                payload.projects.as_deref(),
                payload.avatar_url.as_deref(),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }
}
