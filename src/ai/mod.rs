use axum::async_trait;

use crate::catalog::dto::RecipePayload;
use crate::plan::slot::MealSlot;

pub mod openai;
pub mod testing;

pub use openai::OpenAiClient;

/// Turns free text (a dish name or a pasted recipe) into a structured dish
/// payload.
#[async_trait]
pub trait RecipeExtractor: Send + Sync {
    async fn extract(&self, text_input: &str) -> anyhow::Result<RecipePayload>;
}

/// Produces one `"<Dish Name>: <justification>"` line for the given slot and
/// remaining calorie budget.
#[async_trait]
pub trait DishRecommender: Send + Sync {
    async fn recommend(&self, remaining_calories: i64, slot: MealSlot) -> anyhow::Result<String>;
}
