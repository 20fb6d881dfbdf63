//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::auth_middleware;
use crate::api::AppState;
use crate::domain::{CreateUser, UpdateUser, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::MessageResponse;

/// Path identifiers must be numeric strings
static NUMERIC_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// User creation request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// User email address
    #[validate(email(message = "Email address is required and must be valid"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
    /// Given name
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    #[schema(example = "John")]
    pub first_name: String,
    /// Family name (optional, non-empty when present)
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// Partial user update request; the password is not updatable here
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New email address
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    /// New given name
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    /// New family name
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// Create user routes.
///
/// Only the list route sits behind the bearer-token guard; the other
/// endpoints are open.
pub fn user_routes(state: &AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/", get(list_users))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", post(create_user))
        .route(
            "/:id",
            get(get_user).post(update_user).delete(delete_user),
        )
        .merge(guarded)
}

/// Parse a numeric-string path identifier
fn parse_user_id(raw: &str) -> AppResult<i64> {
    if !NUMERIC_ID.is_match(raw) {
        return Err(AppError::validation("User ID must be numeric string"));
    }

    raw.parse::<i64>()
        .map_err(|_| AppError::validation("User ID must be numeric string"))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Numeric user ID")
    ),
    responses(
        (status = 200, description = "User record, or a message when no user matches", body = UserResponse),
        (status = 400, description = "Non-numeric ID")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_user_id(&id)?;

    // Not-found is reported in the body, not as a hard failure
    let response = match state.user_service.get_user(id).await? {
        Some(user) => Json(UserResponse::from(user)).into_response(),
        None => Json(MessageResponse::new(format!("No user found with ID: {}", id)))
            .into_response(),
    };

    Ok(response)
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Update user by ID
#[utoipa::path(
    post,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Numeric user ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_user_id(&id)?;
    state.user_service.update_user(id, payload.into()).await?;

    Ok(Json(MessageResponse::new(format!(
        "Successfully updated user with ID: {}",
        id
    ))))
}

/// Delete user by ID
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Numeric user ID")
    ),
    responses(
        (status = 200, description = "Outcome message for the delete", body = MessageResponse),
        (status = 400, description = "Non-numeric ID")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_user_id(&id)?;

    // The removed-record count distinguishes "deleted" from "nothing to
    // delete"; both are successful responses
    let deleted_count = state.user_service.delete_user(id).await?;
    let message = if deleted_count == 0 {
        format!("No user found with ID: {}", id)
    } else {
        format!("Successfully deleted user by ID: {}", id)
    };

    Ok(Json(MessageResponse::new(message)))
}
