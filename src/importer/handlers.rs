use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::health;
use crate::plan::dates;
use crate::plan::slot::MealSlot;
use crate::state::AppState;

use super::dto::{ImportOutcome, ImportRequest, RecommendParams, RecommendResponse};
use super::workflow;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recommend-me", get(recommend_me))
        .route("/meal-planner/import", post(import_recommendation))
}

/// GET /recommend-me?slot=Dinner[&date]. One dish suggestion sized to the
/// calories still open on that date. The date defaults to today.
#[instrument(skip(state))]
async fn recommend_me(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let slot = MealSlot::parse(&params.slot).ok_or_else(|| {
        ApiError::Validation(format!(
            "invalid slot '{}', expected Breakfast, Lunch or Dinner",
            params.slot
        ))
    })?;
    let date = match params.date.as_deref() {
        Some(d) => dates::canonicalize(d)?,
        None => dates::format_date(dates::today()),
    };

    let stats = health::services::health_stats(&state.db, &date).await?;
    let recommendation = tokio::time::timeout(
        state.ai_timeout(),
        state.recommender.recommend(stats.remaining_calories, slot),
    )
    .await
    .map_err(|_| ApiError::Timeout { collaborator: "recommendation" })?
    .map_err(|e| ApiError::Recommendation(e.to_string()))?;

    tracing::info!(
        date = %date,
        slot = %slot,
        remaining_calories = stats.remaining_calories,
        "recommendation produced"
    );
    Ok(Json(RecommendResponse { recommendation }))
}

/// POST /meal-planner/import {suggestion, planned_date, meal_slot}. Accepts a
/// recommendation line: extracts the dish, saves it and schedules it.
#[instrument(skip(state, body))]
async fn import_recommendation(
    State(state): State<AppState>,
    Json(body): Json<ImportRequest>,
) -> Result<Json<ImportOutcome>, ApiError> {
    if body.suggestion.trim().is_empty() {
        return Err(ApiError::Validation("suggestion must not be empty".into()));
    }
    let date = dates::canonicalize(&body.planned_date)?;
    let slot = MealSlot::parse(&body.meal_slot).ok_or_else(|| {
        ApiError::Validation(format!(
            "invalid meal_slot '{}', expected Breakfast, Lunch or Dinner",
            body.meal_slot
        ))
    })?;

    let outcome = workflow::run_import(&state, &body.suggestion, &date, slot).await?;
    Ok(Json(outcome))
}
