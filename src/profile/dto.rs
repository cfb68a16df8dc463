use serde::{Deserialize, Serialize};

/// Stored profile of the single user. `sex` and `activity_level` are kept as
/// the validated lowercase strings the API exchanges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: i64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: String,
    pub activity_level: String,
}

/// Daily targets derived from the profile. Grams, except calories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroGoals {
    pub calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub sex: Option<String>,
    pub activity_level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub goals: MacroGoals,
}
