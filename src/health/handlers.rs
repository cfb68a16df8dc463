use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::plan::dates;
use crate::state::AppState;

use super::dto::HealthStats;
use super::services;

pub fn router() -> Router<AppState> {
    Router::new().route("/health-stats/:date", get(get_health_stats))
}

#[instrument(skip(state))]
async fn get_health_stats(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<HealthStats>, ApiError> {
    let date = dates::canonicalize(&date)?;
    let stats = services::health_stats(&state.db, &date).await?;
    Ok(Json(stats))
}
