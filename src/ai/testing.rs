//! Deterministic collaborators for the test suites.

use axum::async_trait;

use crate::catalog::dto::{Ingredient, NutritionFacts, RecipePayload};
use crate::plan::slot::MealSlot;

use super::{DishRecommender, RecipeExtractor};

/// Extractor returning a fixed-shape dish named after the input text.
pub struct StubExtractor {
    pub calories: i64,
}

impl Default for StubExtractor {
    fn default() -> Self {
        Self { calories: 500 }
    }
}

#[async_trait]
impl RecipeExtractor for StubExtractor {
    async fn extract(&self, text_input: &str) -> anyhow::Result<RecipePayload> {
        let name = text_input.trim().to_string();
        Ok(RecipePayload {
            name: name.clone(),
            description: format!("Stub recipe for {name}"),
            cuisine: "Test Kitchen".into(),
            thumbnail_url: None,
            meal_types: vec!["Dinner".into()],
            ingredients: vec![Ingredient {
                name: format!("{name} base"),
                quantity: 1.0,
                unit: "portion".into(),
                category: "Pantry".into(),
            }],
            prep_steps: vec!["Prepare".into(), "Serve".into()],
            suggested_pairings: Vec::new(),
            nutrition: NutritionFacts {
                calories: self.calories,
                protein_g: 30.0,
                carbs_g: 45.0,
                fats_g: 15.0,
            },
        })
    }
}

/// Extractor that always fails, for exercising the failure paths.
pub struct FailingExtractor;

#[async_trait]
impl RecipeExtractor for FailingExtractor {
    async fn extract(&self, _text_input: &str) -> anyhow::Result<RecipePayload> {
        anyhow::bail!("extraction service unavailable")
    }
}

/// Extractor that never answers within any sensible deadline.
pub struct SlowExtractor;

#[async_trait]
impl RecipeExtractor for SlowExtractor {
    async fn extract(&self, _text_input: &str) -> anyhow::Result<RecipePayload> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        anyhow::bail!("unreachable")
    }
}

/// Recommender returning the configured line verbatim.
pub struct StubRecommender(pub String);

#[async_trait]
impl DishRecommender for StubRecommender {
    async fn recommend(&self, _remaining_calories: i64, _slot: MealSlot) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

/// Recommender that never answers within any sensible deadline.
pub struct SlowRecommender;

#[async_trait]
impl DishRecommender for SlowRecommender {
    async fn recommend(&self, _remaining_calories: i64, _slot: MealSlot) -> anyhow::Result<String> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        anyhow::bail!("unreachable")
    }
}

/// Recommender that always fails.
pub struct FailingRecommender;

#[async_trait]
impl DishRecommender for FailingRecommender {
    async fn recommend(&self, _remaining_calories: i64, _slot: MealSlot) -> anyhow::Result<String> {
        anyhow::bail!("recommendation service unavailable")
    }
}
