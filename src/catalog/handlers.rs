use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{Dish, ExtractParams, PantryItem, PurchaseParams, RecipePayload};
use super::repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extract-recipe", post(extract_recipe))
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_recipe))
        .route("/cms/recipes/:id", put(update_recipe))
        .route("/cms/recipes/:id/regenerate", post(regenerate_recipe))
        .route("/cms/recipe/:id", delete(delete_recipe))
        .route("/pantry", get(list_pantry))
        .route("/pantry/purchase", post(purchase_pantry_item))
}

/// POST /extract-recipe?text_input=...
/// Delegates to the extraction collaborator, persists the result as a new dish.
#[instrument(skip(state))]
async fn extract_recipe(
    State(state): State<AppState>,
    Query(params): Query<ExtractParams>,
) -> Result<(StatusCode, HeaderMap, Json<Dish>), ApiError> {
    let input = params.text_input.trim();
    if input.is_empty() {
        return Err(ApiError::Validation("text_input must not be empty".into()));
    }

    let payload = tokio::time::timeout(state.ai_timeout(), state.extractor.extract(input))
        .await
        .map_err(|_| ApiError::Timeout { collaborator: "extraction" })?
        .map_err(|e| ApiError::Extraction(e.to_string()))?;
    payload.validate().map_err(|e| {
        ApiError::Extraction(format!("extractor returned an incomplete recipe: {e}"))
    })?;

    let dish: Dish = repo::insert_dish(&state.db, &payload).await?.into();
    tracing::info!(dish_id = dish.id, name = %dish.name, "dish extracted");
    Ok((
        StatusCode::CREATED,
        location(&format!("/recipes/{}", dish.id)),
        Json(dish),
    ))
}

#[instrument(skip(state))]
async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Dish>>, ApiError> {
    let dishes = repo::list_dishes(&state.db).await?;
    Ok(Json(dishes.into_iter().map(Dish::from).collect()))
}

#[instrument(skip(state))]
async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Dish>, ApiError> {
    let dish = repo::get_dish(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("dish {id} not found")))?;
    Ok(Json(dish.into()))
}

/// PUT /cms/recipes/:id, full-replace edit.
#[instrument(skip(state, payload))]
async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RecipePayload>,
) -> Result<Json<Dish>, ApiError> {
    payload.validate()?;
    let dish = repo::replace_dish(&state.db, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("dish {id} not found")))?;
    tracing::info!(dish_id = id, "dish updated");
    Ok(Json(dish.into()))
}

/// POST /cms/recipes/:id/regenerate. Re-extracts from the stored name and
/// overwrites the dish, discarding prior manual edits.
#[instrument(skip(state))]
async fn regenerate_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Dish>, ApiError> {
    let existing = repo::get_dish(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("dish {id} not found")))?;

    let payload = tokio::time::timeout(
        state.ai_timeout(),
        state.extractor.extract(&existing.name),
    )
    .await
    .map_err(|_| ApiError::Timeout { collaborator: "extraction" })?
    .map_err(|e| ApiError::Extraction(e.to_string()))?;
    payload.validate().map_err(|e| {
        ApiError::Extraction(format!("extractor returned an incomplete recipe: {e}"))
    })?;

    let dish = repo::replace_dish(&state.db, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("dish {id} not found")))?;
    tracing::info!(dish_id = id, "dish regenerated");
    Ok(Json(dish.into()))
}

/// DELETE /cms/recipe/:id, rejected while any plan entry references the dish.
#[instrument(skip(state))]
async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let references = repo::plan_reference_count(&state.db, id).await?;
    if references > 0 {
        return Err(ApiError::Conflict(format!(
            "dish {id} is referenced by {references} plan entries; remove them first"
        )));
    }
    let deleted = repo::delete_dish(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("dish {id} not found")));
    }
    tracing::info!(dish_id = id, "dish deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn list_pantry(State(state): State<AppState>) -> Result<Json<Vec<PantryItem>>, ApiError> {
    let items = repo::list_pantry(&state.db).await?;
    Ok(Json(items.into_iter().map(PantryItem::from).collect()))
}

/// POST /pantry/purchase?item_name=&quantity=&unit=
/// Signed delta; negative adjustments floor at zero.
#[instrument(skip(state))]
async fn purchase_pantry_item(
    State(state): State<AppState>,
    Query(params): Query<PurchaseParams>,
) -> Result<Json<PantryItem>, ApiError> {
    if params.item_name.trim().is_empty() {
        return Err(ApiError::Validation("item_name must not be empty".into()));
    }
    if params.unit.trim().is_empty() {
        return Err(ApiError::Validation("unit must not be empty".into()));
    }
    if !params.quantity.is_finite() {
        return Err(ApiError::Validation("quantity must be a finite number".into()));
    }
    let item =
        repo::adjust_pantry(&state.db, &params.item_name, params.quantity, &params.unit).await?;
    tracing::info!(item = %params.item_name, delta = params.quantity, "pantry adjusted");
    Ok(Json(item.into()))
}

fn location(path: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = path.parse() {
        headers.insert(axum::http::header::LOCATION, value);
    }
    headers
}
