pub mod team_dto;
pub mod team_handlers;
pub mod team_models;
pub mod team_repository;
pub mod team_service;

pub use team_models::{PendingRequestResponse, Team, TeamMember, TeamRequest, TeamResponse};
pub use team_repository::TeamRepository;
pub use team_service::TeamService;
