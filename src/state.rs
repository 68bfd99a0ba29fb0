use crate::db::DbPool;
use std::sync::Arc;

use crate::{
    auth::auth_service::AuthService,
    message::{message_repository::MessageRepository, message_service::MessageService},
    team::{team_repository::TeamRepository, team_service::TeamService},
    user::{user_repository::UserRepository, user_service::UserService},
    websocket::RoomRouter,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub room_router: RoomRouter,
    pub user_repository: UserRepository,
    pub team_repository: TeamRepository,
    pub message_repository: MessageRepository,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub team_service: TeamService,
    pub message_service: MessageService,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a number"),
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }
}
