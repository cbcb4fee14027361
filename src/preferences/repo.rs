use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Stored per-user overrides; `None` fields fall back to the system defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromRow)]
pub struct Preferences {
    pub user_id: Uuid,
    pub max_calories: Option<f64>,
    pub theme: Option<String>,
}

pub async fn find_preferences(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Preferences>> {
    let row = sqlx::query_as::<_, Preferences>(
        "SELECT user_id, max_calories, theme FROM preferences WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("find preferences")?;
    Ok(row)
}

/// Creates the row on first write and replaces both fields.
pub async fn upsert_preferences(
    db: &PgPool,
    user_id: Uuid,
    max_calories: Option<f64>,
    theme: Option<&str>,
) -> anyhow::Result<Preferences> {
    let row = sqlx::query_as::<_, Preferences>(
        r#"
        INSERT INTO preferences (user_id, max_calories, theme)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id)
        DO UPDATE SET max_calories = EXCLUDED.max_calories, theme = EXCLUDED.theme
        RETURNING user_id, max_calories, theme
        "#,
    )
    .bind(user_id)
    .bind(max_calories)
    .bind(theme)
    .fetch_one(db)
    .await
    .context("upsert preferences")?;
    Ok(row)
}
