use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;

use crate::catalog;
use crate::error::ApiError;
use crate::state::AppState;

use super::dates;
use super::dto::{PlanEntry, PlanEntryWithDish, PlanQuery, ScheduleRequest};
use super::repo;
use super::slot::MealSlot;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meal-planner", get(list_plan).post(schedule_meal))
        .route("/meal-planner/:id", delete(remove_entry))
}

/// GET /meal-planner[?date_from&date_to]. Entries with their dish resolved,
/// full listing when no bounds are given.
#[instrument(skip(state))]
async fn list_plan(
    State(state): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> Result<Json<Vec<PlanEntryWithDish>>, ApiError> {
    let rows = match (query.date_from.as_deref(), query.date_to.as_deref()) {
        (None, None) => repo::list_all(&state.db).await?,
        (Some(from), Some(to)) => {
            let from = dates::canonicalize(from)?;
            let to = dates::canonicalize(to)?;
            repo::list_between(&state.db, &from, &to).await?
        }
        _ => {
            return Err(ApiError::Validation(
                "date_from and date_to must be provided together".into(),
            ))
        }
    };
    Ok(Json(rows.into_iter().map(PlanEntryWithDish::from).collect()))
}

/// POST /meal-planner {dish_id, planned_date, meal_slot}
#[instrument(skip(state))]
async fn schedule_meal(
    State(state): State<AppState>,
    Json(body): Json<ScheduleRequest>,
) -> Result<(StatusCode, HeaderMap, Json<PlanEntry>), ApiError> {
    let date = dates::canonicalize(&body.planned_date)?;
    let slot = MealSlot::parse(&body.meal_slot).ok_or_else(|| {
        ApiError::Validation(format!(
            "invalid meal_slot '{}', expected Breakfast, Lunch or Dinner",
            body.meal_slot
        ))
    })?;
    if catalog::repo::get_dish(&state.db, body.dish_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("dish {} not found", body.dish_id)));
    }

    let entry: PlanEntry = repo::upsert_entry(&state.db, body.dish_id, &date, slot.as_str())
        .await?
        .into();
    tracing::info!(
        entry_id = entry.id,
        dish_id = entry.dish_id,
        date = %entry.planned_date,
        slot = %entry.meal_slot,
        "meal scheduled"
    );

    let mut headers = HeaderMap::new();
    if let Ok(value) = format!("/meal-planner/{}", entry.id).parse() {
        headers.insert(axum::http::header::LOCATION, value);
    }
    Ok((StatusCode::CREATED, headers, Json(entry)))
}

#[instrument(skip(state))]
async fn remove_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = repo::delete_entry(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("plan entry {id} not found")));
    }
    tracing::info!(entry_id = id, "plan entry removed");
    Ok(StatusCode::NO_CONTENT)
}
