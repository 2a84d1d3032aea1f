//! Profile handlers - public reads and owner-only writes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::auth::AuthUser;
use crate::dto::{DeleteResponse, ProfileDetailsResponse, ProfileRequest, ProfileResponse};
use crate::error::HttpError;
use crate::extract::{ApiJson, ProfileIdPath};
use crate::state::AppState;

/// List every profile in the directory.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProfileResponse>>, HttpError> {
    let profiles = state.core.directory().list().await?;
    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

/// Get a single profile by ID.
pub async fn get(
    State(state): State<AppState>,
    ProfileIdPath(id): ProfileIdPath,
) -> Result<Json<ProfileResponse>, HttpError> {
    Ok(Json(state.core.profiles().get(id).await?.into()))
}

/// The caller's own profile, or `null` when they have none yet.
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Option<ProfileResponse>>, HttpError> {
    let profile = state.core.profiles().own(&user).await?;
    Ok(Json(profile.map(ProfileResponse::from)))
}

/// Create the caller's profile.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(req): ApiJson<ProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), HttpError> {
    let profile = state.core.profiles().create(user, &req.into()).await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// Update the caller's profile.
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ProfileIdPath(id): ProfileIdPath,
    ApiJson(req): ApiJson<ProfileRequest>,
) -> Result<Json<ProfileResponse>, HttpError> {
    let profile = state.core.profiles().update(id, &user, &req.into()).await?;
    Ok(Json(profile.into()))
}

/// Delete the caller's profile and its price history.
pub async fn remove(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ProfileIdPath(id): ProfileIdPath,
) -> Result<Json<DeleteResponse>, HttpError> {
    state.core.profiles().delete(id, &user).await?;
    Ok(Json(DeleteResponse::deleted()))
}

/// A profile with its price history and summary.
pub async fn details(
    State(state): State<AppState>,
    ProfileIdPath(id): ProfileIdPath,
) -> Result<Json<ProfileDetailsResponse>, HttpError> {
    Ok(Json(state.core.directory().profile_with_history(id).await?.into()))
}
