use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub role: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    pub contact: Option<String>,
    pub experience: Option<String>,
    pub projects: Option<String>,
    pub avatar_url: Option<String>,
}
