use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// One recipe ingredient. `category` is the shopping aisle used to group the
/// consolidated list (Produce, Dairy, Meat, Pantry, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "Pantry".into()
}

/// Per-dish nutrition, normalized to numbers at ingestion. Upstream payloads
/// carry values like `"12g"` or `"450 kcal"`; anything that cannot be coerced
/// falls back to zero for that field instead of failing the whole record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionFacts {
    #[serde(default, deserialize_with = "lenient_calories")]
    pub calories: i64,
    #[serde(default, alias = "protein", deserialize_with = "lenient_grams")]
    pub protein_g: f64,
    #[serde(default, alias = "carbs", deserialize_with = "lenient_grams")]
    pub carbs_g: f64,
    #[serde(default, alias = "fats", deserialize_with = "lenient_grams")]
    pub fats_g: f64,
}

/// Full dish payload: what the extractor returns and what CMS edits submit.
/// `suitable_for` is accepted as an alias for `meal_types`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, alias = "suitable_for")]
    pub meal_types: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub prep_steps: Vec<String>,
    #[serde(default)]
    pub suggested_pairings: Vec<String>,
    #[serde(default)]
    pub nutrition: NutritionFacts,
}

impl RecipePayload {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("dish name must not be empty".into()));
        }
        if self.ingredients.is_empty() {
            return Err(ApiError::Validation(
                "dish needs at least one ingredient".into(),
            ));
        }
        if self.prep_steps.is_empty() {
            return Err(ApiError::Validation(
                "dish needs at least one prep step".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub cuisine: String,
    pub thumbnail_url: Option<String>,
    pub meal_types: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub prep_steps: Vec<String>,
    pub suggested_pairings: Vec<String>,
    pub nutrition: NutritionFacts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: f64,
    pub min_threshold: f64,
    pub low_stock: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExtractParams {
    pub text_input: String,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseParams {
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
}

fn lenient_grams<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(de)? {
        Some(Raw::Num(n)) if n.is_finite() => n,
        Some(Raw::Num(_)) | None => 0.0,
        Some(Raw::Text(s)) => leading_number(&s),
    })
}

fn lenient_calories<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(de)? {
        Some(Raw::Num(n)) if n.is_finite() => n.round() as i64,
        Some(Raw::Num(_)) | None => 0,
        Some(Raw::Text(s)) => leading_number(&s).round() as i64,
    })
}

/// Numeric prefix of a string like "12g" or "450 kcal"; zero when there is none.
fn leading_number(s: &str) -> f64 {
    let t = s.trim();
    let mut end = 0;
    for (i, c) in t.char_indices() {
        if c.is_ascii_digit() || c == '.' || (c == '-' && i == 0) {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    t[..end].parse().unwrap_or(0.0)
}
