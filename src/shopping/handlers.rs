use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use time::Duration;
use tracing::instrument;

use crate::error::ApiError;
use crate::plan::dates;
use crate::state::AppState;

use super::dto::{ShoppingListItem, ShoppingQuery};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new().route("/shopping-list", get(get_shopping_list))
}

/// GET /shopping-list[?date_from&date_to]. Defaults to the seven-day
/// planner window starting today when no bounds are given.
#[instrument(skip(state))]
async fn get_shopping_list(
    State(state): State<AppState>,
    Query(query): Query<ShoppingQuery>,
) -> Result<Json<Vec<ShoppingListItem>>, ApiError> {
    let (from, to) = match (query.date_from.as_deref(), query.date_to.as_deref()) {
        (None, None) => {
            let start = dates::today();
            (
                dates::format_date(start),
                dates::format_date(start + Duration::days(6)),
            )
        }
        (Some(from), Some(to)) => (dates::canonicalize(from)?, dates::canonicalize(to)?),
        _ => {
            return Err(ApiError::Validation(
                "date_from and date_to must be provided together".into(),
            ))
        }
    };
    let items = services::shopping_list(&state.db, &from, &to).await?;
    Ok(Json(items))
}
