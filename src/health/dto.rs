use serde::{Deserialize, Serialize};

use crate::profile::dto::MacroGoals;

/// Summed nutrition of every dish planned for one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: i64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

/// Progress of actual against goal per tracked figure, clamped at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStats {
    pub date: String,
    pub actual: NutritionTotals,
    pub goals: MacroGoals,
    pub remaining_calories: i64,
    pub progress: ProgressReport,
}
