use crate::auth::auth_dto::{AuthResponse, RegisterRequest};
use crate::auth::{create_jwt, hash_password, verify_password};
use crate::error::{AppError, Result};
use crate::user::user_repository::UserRepository;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, jwt_expiration_hours: i64) -> Self {
        Self {
            user_repo,
            jwt_secret,
            jwt_expiration_hours,
        }
    }

    pub async fn register(&self, payload: RegisterRequest) -> Result<AuthResponse> {
        if self.user_repo.find_by_email(&payload.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&payload.password)?;
        let user = self.user_repo.create(&payload, &password_hash).await?;

        let token = create_jwt(user.id, &user.email, &self.jwt_secret, self.jwt_expiration_hours)?;

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        verify_password(password, &user.password_hash)?;

        let token = create_jwt(user.id, &user.email, &self.jwt_secret, self.jwt_expiration_hours)?;

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }
}
