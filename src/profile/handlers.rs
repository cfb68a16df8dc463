use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{ProfileResponse, ProfileUpdate, UserProfile};
use super::{repo, services};

pub fn router() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

/// GET /profile, stored profile plus goals derived from it right now.
#[instrument(skip(state))]
async fn get_profile(State(state): State<AppState>) -> Result<Json<ProfileResponse>, ApiError> {
    let profile: UserProfile = repo::get_profile(&state.db)
        .await?
        .ok_or(ApiError::ProfileMissing)?
        .into();
    let goals = services::derive_goals(&profile)?;
    Ok(Json(ProfileResponse { profile, goals }))
}

/// PUT /profile, partial update; response carries freshly derived goals.
#[instrument(skip(state))]
async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileResponse>, ApiError> {
    services::validate_update(&update)?;
    let profile: UserProfile = repo::update_profile(&state.db, &update)
        .await?
        .ok_or(ApiError::ProfileMissing)?
        .into();
    let goals = services::derive_goals(&profile)?;
    tracing::info!("profile updated");
    Ok(Json(ProfileResponse { profile, goals }))
}
