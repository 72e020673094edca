use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, CreatedUserResponse, UpdateUserRequest},
        extractors::{JsonBody, UserId},
        password::hash_password,
        repo::StoreError,
        repo_types::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(create_user).get(list_users))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn store_error(action: &str, e: StoreError) -> ApiError {
    match &e {
        StoreError::NotFound | StoreError::Conflict(_) => warn!(error = %e, "{}", action),
        StoreError::Connectivity(_) | StoreError::Other(_) => error!(error = %e, "{}", action),
    }
    ApiError::from_store(action, &e)
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), ApiError> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        warn!("create user with missing fields");
        return Err(ApiError::bad_request("name, email and password are required"));
    }

    let hash = hash_password(&payload.password)
        .map_err(|e| ApiError::internal(format!("error creating user: {e}")))?;

    let id = state
        .users
        .create_user(&payload.name, &payload.email, &hash)
        .await
        .map_err(|e| store_error("error creating user", e))?;

    info!(user_id = id, email = %payload.email, "user created");
    Ok((StatusCode::CREATED, Json(CreatedUserResponse { id })))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .users
        .list_users()
        .await
        .map_err(|e| store_error("error listing users", e))?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .get_user(id)
        .await
        .map_err(|e| store_error("error fetching user", e))?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(payload): JsonBody<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    if payload.name.is_empty() || payload.email.is_empty() {
        warn!(user_id = id, "update user with missing fields");
        return Err(ApiError::bad_request("name and email are required"));
    }

    state
        .users
        .update_user(id, &payload.name, &payload.email)
        .await
        .map_err(|e| store_error("error updating user", e))?;

    info!(user_id = id, "user updated");
    Ok(StatusCode::OK)
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<StatusCode, ApiError> {
    state
        .users
        .delete_user(id)
        .await
        .map_err(|e| store_error("error deleting user", e))?;

    info!(user_id = id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
