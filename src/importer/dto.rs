use serde::{Deserialize, Serialize};

use crate::catalog::dto::Dish;
use crate::health::dto::HealthStats;
use crate::plan::dto::PlanEntry;

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub slot: String,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendation: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub suggestion: String,
    pub planned_date: String,
    pub meal_slot: String,
}

/// Everything one import produced: the saved dish, the plan entry it landed
/// in, and the refreshed stats for that date.
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub dish: Dish,
    pub entry: PlanEntry,
    pub stats: HealthStats,
}
