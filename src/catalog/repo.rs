use sqlx::types::Json;
use sqlx::SqlitePool;

use super::dto::RecipePayload;
use super::repo_types::{DishRow, PantryItemRow};

pub async fn insert_dish(db: &SqlitePool, payload: &RecipePayload) -> sqlx::Result<DishRow> {
    sqlx::query_as::<_, DishRow>(
        r#"
        INSERT INTO dishes
            (name, description, cuisine, thumbnail_url, meal_types, ingredients,
             prep_steps, suggested_pairings, calories, protein_g, carbs_g, fats_g)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, name, description, cuisine, thumbnail_url, meal_types,
                  ingredients, prep_steps, suggested_pairings, calories,
                  protein_g, carbs_g, fats_g
        "#,
    )
    .bind(payload.name.trim())
    .bind(&payload.description)
    .bind(&payload.cuisine)
    .bind(&payload.thumbnail_url)
    .bind(Json(&payload.meal_types))
    .bind(Json(&payload.ingredients))
    .bind(Json(&payload.prep_steps))
    .bind(Json(&payload.suggested_pairings))
    .bind(payload.nutrition.calories)
    .bind(payload.nutrition.protein_g)
    .bind(payload.nutrition.carbs_g)
    .bind(payload.nutrition.fats_g)
    .fetch_one(db)
    .await
}

/// Full replace: the payload wholly overwrites the stored dish, including
/// nutrition, steps, ingredients and pairings. Returns None when the id
/// does not exist.
pub async fn replace_dish(
    db: &SqlitePool,
    id: i64,
    payload: &RecipePayload,
) -> sqlx::Result<Option<DishRow>> {
    sqlx::query_as::<_, DishRow>(
        r#"
        UPDATE dishes SET
            name = ?, description = ?, cuisine = ?, thumbnail_url = ?,
            meal_types = ?, ingredients = ?, prep_steps = ?,
            suggested_pairings = ?, calories = ?, protein_g = ?,
            carbs_g = ?, fats_g = ?
        WHERE id = ?
        RETURNING id, name, description, cuisine, thumbnail_url, meal_types,
                  ingredients, prep_steps, suggested_pairings, calories,
                  protein_g, carbs_g, fats_g
        "#,
    )
    .bind(payload.name.trim())
    .bind(&payload.description)
    .bind(&payload.cuisine)
    .bind(&payload.thumbnail_url)
    .bind(Json(&payload.meal_types))
    .bind(Json(&payload.ingredients))
    .bind(Json(&payload.prep_steps))
    .bind(Json(&payload.suggested_pairings))
    .bind(payload.nutrition.calories)
    .bind(payload.nutrition.protein_g)
    .bind(payload.nutrition.carbs_g)
    .bind(payload.nutrition.fats_g)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn get_dish(db: &SqlitePool, id: i64) -> sqlx::Result<Option<DishRow>> {
    sqlx::query_as::<_, DishRow>(
        r#"
        SELECT id, name, description, cuisine, thumbnail_url, meal_types,
               ingredients, prep_steps, suggested_pairings, calories,
               protein_g, carbs_g, fats_g
        FROM dishes
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn list_dishes(db: &SqlitePool) -> sqlx::Result<Vec<DishRow>> {
    sqlx::query_as::<_, DishRow>(
        r#"
        SELECT id, name, description, cuisine, thumbnail_url, meal_types,
               ingredients, prep_steps, suggested_pairings, calories,
               protein_g, carbs_g, fats_g
        FROM dishes
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn delete_dish(db: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM dishes WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn plan_reference_count(db: &SqlitePool, dish_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM meal_plan_entries WHERE dish_id = ?")
        .bind(dish_id)
        .fetch_one(db)
        .await
}

/// Signed quantity adjustment keyed on case-folded (name, unit). Creates the
/// item when absent; the resulting quantity never drops below zero. The whole
/// operation is one upsert so concurrent adjustments cannot interleave.
pub async fn adjust_pantry(
    db: &SqlitePool,
    name: &str,
    delta: f64,
    unit: &str,
) -> sqlx::Result<PantryItemRow> {
    let name = name.trim();
    let unit = unit.trim();
    sqlx::query_as::<_, PantryItemRow>(
        r#"
        INSERT INTO pantry_items (name, name_key, unit, unit_key, quantity)
        VALUES (?1, ?2, ?3, ?4, MAX(0.0, ?5))
        ON CONFLICT (name_key, unit_key)
        DO UPDATE SET quantity = MAX(0.0, pantry_items.quantity + ?5)
        RETURNING id, name, category, unit, quantity, min_threshold
        "#,
    )
    .bind(name)
    .bind(name.to_lowercase())
    .bind(unit)
    .bind(unit.to_lowercase())
    .bind(delta)
    .fetch_one(db)
    .await
}

pub async fn list_pantry(db: &SqlitePool) -> sqlx::Result<Vec<PantryItemRow>> {
    sqlx::query_as::<_, PantryItemRow>(
        r#"
        SELECT id, name, category, unit, quantity, min_threshold
        FROM pantry_items
        ORDER BY category, name
        "#,
    )
    .fetch_all(db)
    .await
}
