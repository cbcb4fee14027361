use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::PortionRow;

const SELECT_PORTIONS: &str = r#"
    SELECT p.id, p.user_id, p.date, p.quantity, p.note,
           p.food_id, f.name AS food_name, f.calories_per_unit,
           p.meal_id, m.name AS meal_name
      FROM portions p
      LEFT JOIN foods f ON f.id = p.food_id
      LEFT JOIN meals m ON m.id = p.meal_id
"#;

/// Column values of a portion as written by the owner.
#[derive(Debug, Clone)]
pub struct PortionFields {
    pub date: Date,
    pub quantity: f64,
    pub note: String,
    pub food_id: Uuid,
    pub meal_id: Option<Uuid>,
}

/// All portions of a user between `from` and `to` (both inclusive, both optional).
pub async fn fetch_portions(
    db: &PgPool,
    user_id: Uuid,
    from: Option<Date>,
    to: Option<Date>,
) -> anyhow::Result<Vec<PortionRow>> {
    let sql = format!(
        "{SELECT_PORTIONS}
         WHERE p.user_id = $1
           AND ($2::date IS NULL OR p.date >= $2)
           AND ($3::date IS NULL OR p.date <= $3)
         ORDER BY p.date ASC, p.id ASC"
    );
    let rows = sqlx::query_as::<_, PortionRow>(&sql)
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(db)
        .await
        .context("fetch portions")?;
    Ok(rows)
}

pub async fn find_portion(
    db: &PgPool,
    user_id: Uuid,
    portion_id: Uuid,
) -> anyhow::Result<Option<PortionRow>> {
    let sql = format!("{SELECT_PORTIONS} WHERE p.id = $1 AND p.user_id = $2");
    let row = sqlx::query_as::<_, PortionRow>(&sql)
        .bind(portion_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("find portion")?;
    Ok(row)
}

pub async fn insert_portion(
    db: &PgPool,
    user_id: Uuid,
    fields: &PortionFields,
) -> anyhow::Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO portions (user_id, date, quantity, note, food_id, meal_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(fields.date)
    .bind(fields.quantity)
    .bind(&fields.note)
    .bind(fields.food_id)
    .bind(fields.meal_id)
    .fetch_one(db)
    .await
    .context("insert portion")?;
    Ok(id)
}

/// Returns `false` when no portion with that id belongs to the user.
pub async fn update_portion(
    db: &PgPool,
    user_id: Uuid,
    portion_id: Uuid,
    fields: &PortionFields,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE portions
           SET date = $3, quantity = $4, note = $5, food_id = $6, meal_id = $7
         WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(portion_id)
    .bind(user_id)
    .bind(fields.date)
    .bind(fields.quantity)
    .bind(&fields.note)
    .bind(fields.food_id)
    .bind(fields.meal_id)
    .execute(db)
    .await
    .context("update portion")?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_portion(db: &PgPool, user_id: Uuid, portion_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM portions WHERE id = $1 AND user_id = $2")
        .bind(portion_id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete portion")?;
    Ok(result.rows_affected() > 0)
}
