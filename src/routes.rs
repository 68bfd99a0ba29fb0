use crate::{
    auth::{
        auth_dto::{AuthResponse, LoginRequest, RegisterRequest},
        auth_handlers,
    },
    message::{
        message_dto::{DirectContact, InboxEntry, InboxKind},
        message_handlers,
        message_models::{Message, MessageResponse},
    },
    middleware::auth_middleware,
    state::AppState,
    team::{
        team_dto::{CreateTeamRequest, TeamInviteRequest, UpdateTeamNameRequest},
        team_handlers,
        team_models::{PendingRequestResponse, Team, TeamMember, TeamRequest, TeamResponse},
    },
    user::{
        user_dto::UpdateProfileRequest,
        user_handlers,
        user_models::{CrewMemberResponse, User, UserResponse},
    },
};
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::auth::auth_handlers::register,
        crate::auth::auth_handlers::login,
        crate::user::user_handlers::get_crew,
        crate::user::user_handlers::get_current_user,
        crate::user::user_handlers::update_current_user,
        crate::user::user_handlers::get_user,
        crate::team::team_handlers::create_team,
        crate::team::team_handlers::get_teams,
        crate::team::team_handlers::rename_team,
        crate::team::team_handlers::send_team_request,
        crate::team::team_handlers::get_pending_requests,
        crate::message::message_handlers::get_direct_history,
        crate::message::message_handlers::get_team_history,
        crate::message::message_handlers::get_contacts,
        crate::message::message_handlers::get_inbox,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateProfileRequest,
            CreateTeamRequest,
            UpdateTeamNameRequest,
            TeamInviteRequest,
            User,
            UserResponse,
            CrewMemberResponse,
            Team,
            TeamMember,
            TeamRequest,
            TeamResponse,
            PendingRequestResponse,
            Message,
            MessageResponse,
            DirectContact,
            InboxEntry,
            InboxKind,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User profile and crew browse endpoints"),
        (name = "teams", description = "Team formation endpoints"),
        (name = "messages", description = "Chat history and inbox endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);

    // Public routes (no auth required)
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login));

    // Protected routes (auth required)
    let user_routes = Router::new()
        .route("/", get(user_handlers::get_crew))
        .route(
            "/me",
            get(user_handlers::get_current_user).put(user_handlers::update_current_user),
        )
        .route("/:id", get(user_handlers::get_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let team_routes = Router::new()
        .route(
            "/",
            get(team_handlers::get_teams).post(team_handlers::create_team),
        )
        .route(
            "/requests",
            get(team_handlers::get_pending_requests).post(team_handlers::send_team_request),
        )
        .route("/:id/name", put(team_handlers::rename_team))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let message_routes = Router::new()
        .route("/direct/:user_id", get(message_handlers::get_direct_history))
        .route("/team/:team_id", get(message_handlers::get_team_history))
        .route("/contacts", get(message_handlers::get_contacts))
        .route("/inbox", get(message_handlers::get_inbox))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // WebSocket route
    let ws_routes = Router::new()
        .route("/ws", get(crate::websocket::ws_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/teams", team_routes)
        .nest("/messages", message_routes)
        .merge(ws_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
