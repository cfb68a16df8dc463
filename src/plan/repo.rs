use sqlx::SqlitePool;

use super::repo_types::{PlanEntryDishRow, PlanEntryRow};

/// Last write wins: scheduling into an occupied (date, slot) cell replaces
/// its dish in one atomic upsert against the UNIQUE(planned_date, meal_slot)
/// index, so concurrent schedules cannot race into the same slot.
pub async fn upsert_entry(
    db: &SqlitePool,
    dish_id: i64,
    planned_date: &str,
    meal_slot: &str,
) -> sqlx::Result<PlanEntryRow> {
    sqlx::query_as::<_, PlanEntryRow>(
        r#"
        INSERT INTO meal_plan_entries (dish_id, planned_date, meal_slot)
        VALUES (?, ?, ?)
        ON CONFLICT (planned_date, meal_slot)
        DO UPDATE SET dish_id = excluded.dish_id
        RETURNING id, dish_id, planned_date, meal_slot
        "#,
    )
    .bind(dish_id)
    .bind(planned_date)
    .bind(meal_slot)
    .fetch_one(db)
    .await
}

pub async fn delete_entry(db: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM meal_plan_entries WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn find_slot(
    db: &SqlitePool,
    planned_date: &str,
    meal_slot: &str,
) -> sqlx::Result<Option<PlanEntryRow>> {
    sqlx::query_as::<_, PlanEntryRow>(
        r#"
        SELECT id, dish_id, planned_date, meal_slot
        FROM meal_plan_entries
        WHERE planned_date = ? AND meal_slot = ?
        "#,
    )
    .bind(planned_date)
    .bind(meal_slot)
    .fetch_optional(db)
    .await
}

const LIST_COLUMNS: &str = r#"
    SELECT e.id, e.dish_id, e.planned_date, e.meal_slot,
           d.name, d.description, d.cuisine, d.thumbnail_url, d.meal_types,
           d.ingredients, d.prep_steps, d.suggested_pairings, d.calories,
           d.protein_g, d.carbs_g, d.fats_g
    FROM meal_plan_entries e
    JOIN dishes d ON d.id = e.dish_id
"#;

const LIST_ORDER: &str = r#"
    ORDER BY e.planned_date,
             CASE e.meal_slot WHEN 'Breakfast' THEN 0 WHEN 'Lunch' THEN 1 ELSE 2 END,
             e.id
"#;

pub async fn list_all(db: &SqlitePool) -> sqlx::Result<Vec<PlanEntryDishRow>> {
    let sql = format!("{LIST_COLUMNS} {LIST_ORDER}");
    sqlx::query_as::<_, PlanEntryDishRow>(&sql).fetch_all(db).await
}

/// Entries whose planned_date falls in the closed [date_from, date_to] range,
/// ordered by date then slot position.
pub async fn list_between(
    db: &SqlitePool,
    date_from: &str,
    date_to: &str,
) -> sqlx::Result<Vec<PlanEntryDishRow>> {
    let sql = format!("{LIST_COLUMNS} WHERE e.planned_date BETWEEN ? AND ? {LIST_ORDER}");
    sqlx::query_as::<_, PlanEntryDishRow>(&sql)
        .bind(date_from)
        .bind(date_to)
        .fetch_all(db)
        .await
}
