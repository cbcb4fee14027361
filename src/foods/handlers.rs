use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::FoodBody,
    repo::{self, Food},
};
use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/:id", put(update_food))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<Food>>> {
    Ok(Json(repo::list_foods(&state.db, user_id).await?))
}

#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<FoodBody>,
) -> ApiResult<(StatusCode, Json<Food>)> {
    let (name, calories_per_unit) = body.validate()?;
    let food = repo::insert_food(&state.db, user_id, &name, calories_per_unit).await?;
    info!(%user_id, food_id = %food.id, "food created");
    Ok((StatusCode::CREATED, Json(food)))
}

#[instrument(skip(state, body))]
pub async fn update_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<FoodBody>,
) -> ApiResult<Json<Food>> {
    let (name, calories_per_unit) = body.validate()?;
    let food = repo::update_food(&state.db, user_id, id, &name, calories_per_unit)
        .await?
        .ok_or(ApiError::NotFound("Food"))?;
    info!(%user_id, food_id = %food.id, "food updated");
    Ok(Json(food))
}
