use sqlx::{FromRow, SqlitePool};

use super::dto::{ProfileUpdate, UserProfile};

#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub name: String,
    pub age: i64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: String,
    pub activity_level: String,
}

impl From<ProfileRow> for UserProfile {
    fn from(r: ProfileRow) -> Self {
        Self {
            name: r.name,
            age: r.age,
            weight_kg: r.weight_kg,
            height_cm: r.height_cm,
            sex: r.sex,
            activity_level: r.activity_level,
        }
    }
}

pub async fn get_profile(db: &SqlitePool) -> sqlx::Result<Option<ProfileRow>> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT name, age, weight_kg, height_cm, sex, activity_level
        FROM user_profiles
        WHERE id = 1
        "#,
    )
    .fetch_optional(db)
    .await
}

/// Partial update: absent fields keep their stored values.
pub async fn update_profile(
    db: &SqlitePool,
    update: &ProfileUpdate,
) -> sqlx::Result<Option<ProfileRow>> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        UPDATE user_profiles SET
            name = COALESCE(?, name),
            age = COALESCE(?, age),
            weight_kg = COALESCE(?, weight_kg),
            height_cm = COALESCE(?, height_cm),
            sex = COALESCE(?, sex),
            activity_level = COALESCE(?, activity_level)
        WHERE id = 1
        RETURNING name, age, weight_kg, height_cm, sex, activity_level
        "#,
    )
    .bind(&update.name)
    .bind(update.age)
    .bind(update.weight_kg)
    .bind(update.height_cm)
    .bind(&update.sex)
    .bind(&update.activity_level)
    .fetch_optional(db)
    .await
}
