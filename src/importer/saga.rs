//! Persistence for the import journal. Every state change is one UPDATE so a
//! crash between steps leaves a row the recovery sweep can act on.

use sqlx::SqlitePool;

/// Lifecycle of one recommendation import. `DishSaved` covers the window
/// where the dish row exists but its plan entry does not yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SagaState {
    Importing,
    DishSaved,
    Scheduled,
    Failed,
    Discarded,
}

impl SagaState {
    pub fn as_str(self) -> &'static str {
        match self {
            SagaState::Importing => "importing",
            SagaState::DishSaved => "dish_saved",
            SagaState::Scheduled => "scheduled",
            SagaState::Failed => "failed",
            SagaState::Discarded => "discarded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "importing" => Some(SagaState::Importing),
            "dish_saved" => Some(SagaState::DishSaved),
            "scheduled" => Some(SagaState::Scheduled),
            "failed" => Some(SagaState::Failed),
            "discarded" => Some(SagaState::Discarded),
            _ => None,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct SagaRow {
    pub id: String,
    pub suggestion: String,
    pub dish_name: String,
    pub planned_date: String,
    pub meal_slot: String,
    pub state: String,
    pub dish_id: Option<i64>,
    pub error: Option<String>,
}

pub async fn create(
    db: &SqlitePool,
    id: &str,
    suggestion: &str,
    dish_name: &str,
    planned_date: &str,
    meal_slot: &str,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO import_sagas (id, suggestion, dish_name, planned_date, meal_slot)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(suggestion)
    .bind(dish_name)
    .bind(planned_date)
    .bind(meal_slot)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn mark_dish_saved(db: &SqlitePool, id: &str, dish_id: i64) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        UPDATE import_sagas
        SET state = 'dish_saved', dish_id = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(dish_id)
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn mark_scheduled(db: &SqlitePool, id: &str) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        UPDATE import_sagas
        SET state = 'scheduled', error = NULL, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn mark_failed(db: &SqlitePool, id: &str, error: &str) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        UPDATE import_sagas
        SET state = 'failed', error = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(error)
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

/// Store the scheduling error without leaving `dish_saved`: the dish is
/// already durable and the recovery sweep can still finish the schedule.
pub async fn record_schedule_error(db: &SqlitePool, id: &str, error: &str) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        UPDATE import_sagas
        SET error = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(error)
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn mark_discarded(db: &SqlitePool, id: &str) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        UPDATE import_sagas
        SET state = 'discarded', updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

/// Rows a crash may have stranded mid-import, oldest first.
pub async fn list_unfinished(db: &SqlitePool) -> sqlx::Result<Vec<SagaRow>> {
    sqlx::query_as::<_, SagaRow>(
        r#"
        SELECT id, suggestion, dish_name, planned_date, meal_slot, state, dish_id, error
        FROM import_sagas
        WHERE state IN ('importing', 'dish_saved')
        ORDER BY created_at, id
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn get(db: &SqlitePool, id: &str) -> sqlx::Result<Option<SagaRow>> {
    sqlx::query_as::<_, SagaRow>(
        r#"
        SELECT id, suggestion, dish_name, planned_date, meal_slot, state, dish_id, error
        FROM import_sagas
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}
