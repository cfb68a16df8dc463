use anyhow::Context;
use axum::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::dto::RecipePayload;
use crate::config::AiConfig;
use crate::plan::slot::MealSlot;

use super::{DishRecommender, RecipeExtractor};

const EXTRACT_SYSTEM_PROMPT: &str = "You are an AI Culinary Expert. Extract the dish as a \
    single JSON object with the fields name, description, cuisine, meal_types (array of \
    Breakfast/Lunch/Dinner), ingredients (array of {name, quantity, unit, category}), \
    prep_steps (array of strings), suggested_pairings (array of dish names) and nutrition \
    ({calories, protein_g, carbs_g, fats_g}). Categorize ingredients into aisles like \
    Produce, Dairy, Meat, or Pantry. If nutritional values are missing, provide accurate \
    culinary estimates.";

const RECOMMEND_SYSTEM_PROMPT: &str = "You are a meal planning assistant. Answer with \
    exactly one line of the form '<Dish Name>: <short justification>'. No markdown, no \
    extra lines.";

/// Chat-completions client speaking to OpenAI or any compatible endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn chat(&self, system: &str, user: &str, json_object: bool) -> anyhow::Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: 0.2,
            response_format: json_object.then_some(ResponseFormat { format_type: "json_object" }),
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("send chat completion request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("chat completion returned {status}: {body}");
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("decode chat completion response")?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("chat completion carried no content"))
    }
}

#[async_trait]
impl RecipeExtractor for OpenAiClient {
    async fn extract(&self, text_input: &str) -> anyhow::Result<RecipePayload> {
        let user = format!("Extract the full dish details from: {text_input}");
        let content = self.chat(EXTRACT_SYSTEM_PROMPT, &user, true).await?;
        let payload = serde_json::from_str(strip_code_fences(&content))
            .context("extractor returned malformed JSON")?;
        Ok(payload)
    }
}

#[async_trait]
impl DishRecommender for OpenAiClient {
    async fn recommend(&self, remaining_calories: i64, slot: MealSlot) -> anyhow::Result<String> {
        let user = format!(
            "Suggest one dish for {slot} that fits into {remaining_calories} remaining kcal today."
        );
        let line = self.chat(RECOMMEND_SYSTEM_PROMPT, &user, false).await?;
        Ok(line.trim().to_string())
    }
}

/// Models occasionally wrap JSON in markdown fences despite instructions.
fn strip_code_fences(s: &str) -> &str {
    let t = s.trim();
    let t = t
        .strip_prefix("```json")
        .or_else(|| t.strip_prefix("```"))
        .unwrap_or(t);
    let t = t.strip_suffix("```").unwrap_or(t);
    t.trim()
}
