use sqlx::types::Json;
use sqlx::FromRow;

use super::dto::{Dish, Ingredient, NutritionFacts, PantryItem};

#[derive(Debug, FromRow)]
pub struct DishRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub cuisine: String,
    pub thumbnail_url: Option<String>,
    pub meal_types: Json<Vec<String>>,
    pub ingredients: Json<Vec<Ingredient>>,
    pub prep_steps: Json<Vec<String>>,
    pub suggested_pairings: Json<Vec<String>>,
    pub calories: i64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

impl From<DishRow> for Dish {
    fn from(r: DishRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            cuisine: r.cuisine,
            thumbnail_url: r.thumbnail_url,
            meal_types: r.meal_types.0,
            ingredients: r.ingredients.0,
            prep_steps: r.prep_steps.0,
            suggested_pairings: r.suggested_pairings.0,
            nutrition: NutritionFacts {
                calories: r.calories,
                protein_g: r.protein_g,
                carbs_g: r.carbs_g,
                fats_g: r.fats_g,
            },
        }
    }
}

#[derive(Debug, FromRow)]
pub struct PantryItemRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: f64,
    pub min_threshold: f64,
}

impl From<PantryItemRow> for PantryItem {
    fn from(r: PantryItemRow) -> Self {
        let low_stock = r.quantity <= r.min_threshold;
        Self {
            id: r.id,
            name: r.name,
            category: r.category,
            unit: r.unit,
            quantity: r.quantity,
            min_threshold: r.min_threshold,
            low_stock,
        }
    }
}
