use sqlx::types::Json;
use sqlx::FromRow;

use crate::catalog::dto::{Dish, Ingredient, NutritionFacts};

use super::dto::{PlanEntry, PlanEntryWithDish};

#[derive(Debug, FromRow)]
pub struct PlanEntryRow {
    pub id: i64,
    pub dish_id: i64,
    pub planned_date: String,
    pub meal_slot: String,
}

impl From<PlanEntryRow> for PlanEntry {
    fn from(r: PlanEntryRow) -> Self {
        Self {
            id: r.id,
            dish_id: r.dish_id,
            planned_date: r.planned_date,
            meal_slot: r.meal_slot,
        }
    }
}

/// Plan entry joined with its dish, flattened into one result row.
#[derive(Debug, FromRow)]
pub struct PlanEntryDishRow {
    pub id: i64,
    pub dish_id: i64,
    pub planned_date: String,
    pub meal_slot: String,
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

impl From<PlanEntryDishRow> for PlanEntryWithDish {
    fn from(r: PlanEntryDishRow) -> Self {
        Self {
            id: r.id,
            dish_id: r.dish_id,
            planned_date: r.planned_date,
            meal_slot: r.meal_slot,
            dish: Dish {
                id: r.dish_id,
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
            },
        }
    }
}
