#![allow(dead_code)]

use smartkitchen::catalog;
use smartkitchen::catalog::dto::{Dish, Ingredient, NutritionFacts, RecipePayload};
use smartkitchen::AppState;

/// Migrated in-memory state with stub AI collaborators.
pub async fn test_state() -> AppState {
    AppState::fake().await
}

/// Recipe payload with fixed macros (20 g protein, 30 g carbs, 10 g fat) and
/// the given calories; ingredients are (name, quantity, unit, category).
pub fn recipe(
    name: &str,
    calories: i64,
    ingredients: Vec<(&str, f64, &str, &str)>,
) -> RecipePayload {
    RecipePayload {
        name: name.into(),
        description: format!("{name} for tests"),
        cuisine: "Test Kitchen".into(),
        thumbnail_url: None,
        meal_types: vec!["Dinner".into()],
        ingredients: ingredients
            .into_iter()
            .map(|(n, q, u, c)| Ingredient {
                name: n.into(),
                quantity: q,
                unit: u.into(),
                category: c.into(),
            })
            .collect(),
        prep_steps: vec!["Cook".into()],
        suggested_pairings: vec![],
        nutrition: NutritionFacts {
            calories,
            protein_g: 20.0,
            carbs_g: 30.0,
            fats_g: 10.0,
        },
    }
}

pub async fn seed_dish(state: &AppState, payload: &RecipePayload) -> Dish {
    catalog::repo::insert_dish(&state.db, payload)
        .await
        .unwrap()
        .into()
}
