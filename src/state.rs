use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::ai::{DishRecommender, OpenAiClient, RecipeExtractor};
use crate::config::{AiConfig, AppConfig};
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub extractor: Arc<dyn RecipeExtractor>,
    pub recommender: Arc<dyn DishRecommender>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url).await?;

        let client = Arc::new(OpenAiClient::new(&config.ai));
        let extractor: Arc<dyn RecipeExtractor> = client.clone();
        let recommender: Arc<dyn DishRecommender> = client;

        Ok(Self {
            db,
            config,
            extractor,
            recommender,
        })
    }

    pub fn from_parts(
        db: SqlitePool,
        config: Arc<AppConfig>,
        extractor: Arc<dyn RecipeExtractor>,
        recommender: Arc<dyn DishRecommender>,
    ) -> Self {
        Self {
            db,
            config,
            extractor,
            recommender,
        }
    }

    /// Test state: migrated in-memory sqlite on a single-connection pool
    /// (every connection to `:memory:` is its own database) and deterministic
    /// AI stubs.
    pub async fn fake() -> Self {
        use crate::ai::testing::{StubExtractor, StubRecommender};

        let db = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        db::run_migrations(&db).await.expect("migrations");

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            ai: AiConfig {
                api_key: "test".into(),
                base_url: "http://ai.invalid".into(),
                model: "test-model".into(),
                timeout_secs: 5,
            },
        });

        Self {
            db,
            config,
            extractor: Arc::new(StubExtractor::default()),
            recommender: Arc::new(StubRecommender(
                "Grilled Salmon: high protein, low carb".into(),
            )),
        }
    }

    /// Budget for one call to an AI collaborator.
    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.config.ai.timeout_secs)
    }
}
