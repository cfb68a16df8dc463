//! Two-phase import of an accepted recommendation: extract and save the dish,
//! then schedule it into the requested slot. Each step is journaled in
//! `import_sagas` so a crash between the phases is recoverable.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::catalog;
use crate::catalog::dto::Dish;
use crate::error::ApiError;
use crate::health;
use crate::plan;
use crate::plan::dto::PlanEntry;
use crate::plan::slot::MealSlot;
use crate::state::AppState;

use super::dto::ImportOutcome;
use super::saga::{self, SagaRow, SagaState};

/// Leading dish name of a `"<Dish Name>: <justification>"` line. Lines
/// without a colon are taken whole; surrounding quotes are stripped.
pub fn parse_dish_name(suggestion: &str) -> String {
    suggestion
        .split(':')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// Run one import end to end. `planned_date` must already be canonical.
///
/// Failure handling is deliberately asymmetric: an extraction failure marks
/// the saga `failed` and nothing is persisted, while a scheduling failure
/// after the dish row exists keeps the saga in `dish_saved` with the error
/// recorded, so the dish survives and recovery can finish the job.
pub async fn run_import(
    state: &AppState,
    suggestion: &str,
    planned_date: &str,
    slot: MealSlot,
) -> Result<ImportOutcome, ApiError> {
    let dish_name = parse_dish_name(suggestion);
    if dish_name.is_empty() {
        return Err(ApiError::Validation(
            "suggestion carries no dish name".into(),
        ));
    }

    let saga_id = Uuid::new_v4().to_string();
    saga::create(
        &state.db,
        &saga_id,
        suggestion,
        &dish_name,
        planned_date,
        slot.as_str(),
    )
    .await?;

    let extracted = tokio::time::timeout(state.ai_timeout(), state.extractor.extract(&dish_name))
        .await
        .map_err(|_| ApiError::Timeout { collaborator: "extraction" })
        .and_then(|r| r.map_err(|e| ApiError::Extraction(e.to_string())));
    let payload = match extracted {
        Ok(payload) => payload,
        Err(err) => {
            fail_saga(&state.db, &saga_id, &err).await;
            return Err(err);
        }
    };
    if let Err(e) = payload.validate() {
        let err = ApiError::Extraction(format!("extractor returned an incomplete recipe: {e}"));
        fail_saga(&state.db, &saga_id, &err).await;
        return Err(err);
    }

    let dish: Dish = match catalog::repo::insert_dish(&state.db, &payload).await {
        Ok(row) => row.into(),
        Err(db_err) => {
            let err = ApiError::Database(db_err);
            fail_saga(&state.db, &saga_id, &err).await;
            return Err(err);
        }
    };
    saga::mark_dish_saved(&state.db, &saga_id, dish.id).await?;

    let entry: PlanEntry =
        match plan::repo::upsert_entry(&state.db, dish.id, planned_date, slot.as_str()).await {
            Ok(row) => row.into(),
            Err(db_err) => {
                let err = ApiError::Database(db_err);
                if let Err(e2) =
                    saga::record_schedule_error(&state.db, &saga_id, &err.to_string()).await
                {
                    tracing::warn!(saga_id = %saga_id, error = %e2, "could not record schedule error");
                }
                return Err(err);
            }
        };
    saga::mark_scheduled(&state.db, &saga_id).await?;

    let stats = health::services::health_stats(&state.db, planned_date).await?;
    tracing::info!(
        saga_id = %saga_id,
        dish_id = dish.id,
        date = planned_date,
        slot = %slot,
        "recommendation imported"
    );
    Ok(ImportOutcome { dish, entry, stats })
}

async fn fail_saga(db: &SqlitePool, saga_id: &str, error: &ApiError) {
    if let Err(db_err) = saga::mark_failed(db, saga_id, &error.to_string()).await {
        tracing::warn!(saga_id = %saga_id, error = %db_err, "could not mark import saga failed");
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryReport {
    pub completed: u32,
    pub discarded: u32,
}

/// Startup sweep over sagas a crash left unfinished. `importing` rows have no
/// durable dish and are discarded. `dish_saved` rows are completed when the
/// dish still exists and the target slot is free, and discarded otherwise;
/// an occupied slot means the user has planned something else meanwhile.
pub async fn recover(db: &SqlitePool) -> anyhow::Result<RecoveryReport> {
    let mut report = RecoveryReport::default();
    for row in saga::list_unfinished(db).await? {
        let completed = match SagaState::parse(&row.state) {
            Some(SagaState::DishSaved) => try_complete(db, &row).await?,
            _ => false,
        };
        if completed {
            report.completed += 1;
        } else {
            saga::mark_discarded(db, &row.id).await?;
            tracing::info!(saga_id = %row.id, state = %row.state, "discarded stranded import");
            report.discarded += 1;
        }
    }
    Ok(report)
}

async fn try_complete(db: &SqlitePool, row: &SagaRow) -> anyhow::Result<bool> {
    let dish_id = match row.dish_id {
        Some(id) => id,
        None => return Ok(false),
    };
    if catalog::repo::get_dish(db, dish_id).await?.is_none() {
        return Ok(false);
    }
    if plan::repo::find_slot(db, &row.planned_date, &row.meal_slot)
        .await?
        .is_some()
    {
        return Ok(false);
    }
    plan::repo::upsert_entry(db, dish_id, &row.planned_date, &row.meal_slot).await?;
    saga::mark_scheduled(db, &row.id).await?;
    tracing::info!(saga_id = %row.id, dish_id, "completed stranded import");
    Ok(true)
}
