use sqlx::SqlitePool;

use crate::catalog::dto::Dish;
use crate::error::ApiError;
use crate::plan;
use crate::plan::dto::PlanEntryWithDish;
use crate::profile;
use crate::profile::dto::UserProfile;

use super::dto::{HealthStats, NutritionTotals, ProgressReport};

pub fn sum_nutrition(dishes: &[Dish]) -> NutritionTotals {
    let mut totals = NutritionTotals::default();
    for dish in dishes {
        totals.calories += dish.nutrition.calories;
        totals.protein_g += dish.nutrition.protein_g;
        totals.carbs_g += dish.nutrition.carbs_g;
        totals.fats_g += dish.nutrition.fats_g;
    }
    totals
}

/// min(100, round(100 * actual / goal)). A goal of zero or less counts as 1
/// for the ratio only, so the figure stays defined.
pub fn progress_percent(actual: f64, goal: f64) -> i64 {
    let goal = if goal <= 0.0 { 1.0 } else { goal };
    ((100.0 * actual / goal).round() as i64).min(100)
}

/// Actual-vs-goal aggregation for one date: resolve that date's plan entries
/// to dishes, sum their nutrition, and set it against freshly derived goals.
/// Zero planned entries yield an all-zero actual.
pub async fn health_stats(db: &SqlitePool, date: &str) -> Result<HealthStats, ApiError> {
    let dishes: Vec<Dish> = plan::repo::list_between(db, date, date)
        .await?
        .into_iter()
        .map(|row| PlanEntryWithDish::from(row).dish)
        .collect();
    let actual = sum_nutrition(&dishes);

    let stored: UserProfile = profile::repo::get_profile(db)
        .await?
        .ok_or(ApiError::ProfileMissing)?
        .into();
    let goals = profile::services::derive_goals(&stored)?;

    Ok(HealthStats {
        date: date.to_string(),
        remaining_calories: goals.calories - actual.calories,
        progress: ProgressReport {
            calories: progress_percent(actual.calories as f64, goals.calories as f64),
            protein_g: progress_percent(actual.protein_g, goals.protein_g as f64),
            carbs_g: progress_percent(actual.carbs_g, goals.carbs_g as f64),
            fats_g: progress_percent(actual.fats_g, goals.fats_g as f64),
        },
        actual,
        goals,
    })
}
