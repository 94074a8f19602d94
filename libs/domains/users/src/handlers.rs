//! HTTP handlers for account registration, login and profile

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuthUser, JwtAuth, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, Role, User, UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the auth endpoints
#[derive(OpenApi)]
#[openapi(
    paths(register, login, profile),
    components(
        schemas(RegisterRequest, LoginRequest, AuthResponse, ProfileResponse, UserResponse, Role),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Account registration and authentication")
    )
)]
pub struct ApiDoc;

/// Shared state for the auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt_auth: JwtAuth,
}

impl<R: UserRepository> AuthState<R> {
    /// Sign a token for the user. Subject is the numeric user id.
    fn issue_token(&self, user: &User) -> UserResult<String> {
        self.jwt_auth
            .create_token(
                &user.id.to_string(),
                &user.email,
                &user.display_name(),
                &[user.role.to_string()],
            )
            .map_err(|e| {
                tracing::error!(user_id = user.id, "Failed to create token: {}", e);
                UserError::Token(e.to_string())
            })
    }
}

/// Create the auth router. `/profile` requires a valid token.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, jwt_auth: JwtAuth) -> Router {
    let state = Arc::new(AuthState {
        service,
        jwt_auth: jwt_auth.clone(),
    });

    Router::new()
        .route("/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(jwt_auth, jwt_auth_middleware))
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(state)
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.register(input).await?;
    let token = state.issue_token(&user)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<AuthResponse>> {
    let user = state.service.login(input).await?;
    let token = state.issue_token(&user)?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Auth",
    responses(
        (status = 200, description = "Authenticated user", body = ProfileResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn profile<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, axum_helpers::AppError> {
    let user_id: i32 = auth.user_id()?;
    let user = state.service.get_user(user_id).await?;

    Ok(Json(ProfileResponse { user: user.into() }))
}
