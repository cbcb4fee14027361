use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::PortionBody,
    model::Portion,
    repo::{self, PortionFields},
};
use crate::{
    auth::AuthUser,
    dates::today_utc,
    error::{ApiError, ApiResult},
    foods, meals,
    state::AppState,
};

pub fn portion_routes() -> Router<AppState> {
    Router::new().route("/portions", post(create_portion)).route(
        "/portions/:id",
        get(get_portion).put(update_portion).delete(delete_portion),
    )
}

/// Food and meal must both belong to the caller.
async fn check_references(db: &PgPool, user_id: Uuid, fields: &PortionFields) -> ApiResult<()> {
    if foods::repo::find_food(db, user_id, fields.food_id).await?.is_none() {
        return Err(ApiError::BadRequest(format!("unknown food {}", fields.food_id)));
    }
    if let Some(meal_id) = fields.meal_id {
        if meals::repo::find_meal(db, user_id, meal_id).await?.is_none() {
            return Err(ApiError::BadRequest(format!("unknown meal {meal_id}")));
        }
    }
    Ok(())
}

async fn load_portion(db: &PgPool, user_id: Uuid, id: Uuid) -> ApiResult<Portion> {
    let row = repo::find_portion(db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Portion"))?;
    Ok(Portion::try_from(row)?)
}

#[instrument(skip(state, body))]
pub async fn create_portion(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<PortionBody>,
) -> ApiResult<(StatusCode, HeaderMap, Json<Portion>)> {
    let fields = body.into_fields(today_utc())?;
    check_references(&state.db, user_id, &fields).await?;

    let id = repo::insert_portion(&state.db, user_id, &fields).await?;
    info!(%user_id, portion_id = %id, date = %fields.date, "portion logged");
    let portion = load_portion(&state.db, user_id, id).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/portions/{id}")) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(portion)))
}

#[instrument(skip(state))]
pub async fn get_portion(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Portion>> {
    Ok(Json(load_portion(&state.db, user_id, id).await?))
}

#[instrument(skip(state, body))]
pub async fn update_portion(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<PortionBody>,
) -> ApiResult<Json<Portion>> {
    let fields = body.into_fields(today_utc())?;
    check_references(&state.db, user_id, &fields).await?;

    if !repo::update_portion(&state.db, user_id, id, &fields).await? {
        return Err(ApiError::NotFound("Portion"));
    }
    info!(%user_id, portion_id = %id, "portion updated");
    Ok(Json(load_portion(&state.db, user_id, id).await?))
}

#[instrument(skip(state))]
pub async fn delete_portion(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !repo::delete_portion(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Portion"));
    }
    info!(%user_id, portion_id = %id, "portion deleted");
    Ok(StatusCode::NO_CONTENT)
}
