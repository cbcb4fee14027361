use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A named grouping label such as "Breakfast".
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
}

pub async fn list_meals(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, user_id, name
          FROM meals
         WHERE user_id = $1
         ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list meals")?;
    Ok(rows)
}

pub async fn find_meal(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, user_id, name
          FROM meals
         WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(meal_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("find meal")?;
    Ok(row)
}

pub async fn insert_meal(db: &PgPool, user_id: Uuid, name: &str) -> anyhow::Result<Meal> {
    let meal = sqlx::query_as::<_, Meal>(
        r#"
        INSERT INTO meals (user_id, name)
        VALUES ($1, $2)
        RETURNING id, user_id, name
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(db)
    .await
    .context("insert meal")?;
    Ok(meal)
}

/// Referencing portions survive with `meal_id` set to NULL (`ON DELETE SET NULL`).
pub async fn delete_meal(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
        .bind(meal_id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete meal")?;
    Ok(result.rows_affected() > 0)
}
