use smartkitchen::{app, db, importer, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "smartkitchen=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init().await?;
    db::run_migrations(&state.db).await?;

    // Finish or clear out whatever a previous run left mid-import.
    match importer::workflow::recover(&state.db).await {
        Ok(report) => tracing::info!(
            completed = report.completed,
            discarded = report.discarded,
            "import recovery sweep finished"
        ),
        Err(e) => tracing::warn!(error = %e, "import recovery sweep failed; continuing"),
    }

    let app = app::build_app(state);
    app::serve(app).await
}
