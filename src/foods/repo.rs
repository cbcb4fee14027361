use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Reusable food template. There is no delete: past portions keep referring to it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Food {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub calories_per_unit: f64,
}

pub async fn list_foods(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Food>> {
    let rows = sqlx::query_as::<_, Food>(
        r#"
        SELECT id, user_id, name, calories_per_unit
          FROM foods
         WHERE user_id = $1
         ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list foods")?;
    Ok(rows)
}

pub async fn find_food(db: &PgPool, user_id: Uuid, food_id: Uuid) -> anyhow::Result<Option<Food>> {
    let row = sqlx::query_as::<_, Food>(
        r#"
        SELECT id, user_id, name, calories_per_unit
          FROM foods
         WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(food_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("find food")?;
    Ok(row)
}

pub async fn insert_food(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    calories_per_unit: f64,
) -> anyhow::Result<Food> {
    let food = sqlx::query_as::<_, Food>(
        r#"
        INSERT INTO foods (user_id, name, calories_per_unit)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, name, calories_per_unit
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(calories_per_unit)
    .fetch_one(db)
    .await
    .context("insert food")?;
    Ok(food)
}

/// `None` when the food does not exist or belongs to someone else.
pub async fn update_food(
    db: &PgPool,
    user_id: Uuid,
    food_id: Uuid,
    name: &str,
    calories_per_unit: f64,
) -> anyhow::Result<Option<Food>> {
    let food = sqlx::query_as::<_, Food>(
        r#"
        UPDATE foods
           SET name = $3, calories_per_unit = $4
         WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, calories_per_unit
        "#,
    )
    .bind(food_id)
    .bind(user_id)
    .bind(name)
    .bind(calories_per_unit)
    .fetch_optional(db)
    .await
    .context("update food")?;
    Ok(food)
}
