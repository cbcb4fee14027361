use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::MealBody,
    repo::{self, Meal},
};
use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    state::AppState,
    validation,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/:id", delete(delete_meal))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<Meal>>> {
    Ok(Json(repo::list_meals(&state.db, user_id).await?))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<MealBody>,
) -> ApiResult<(StatusCode, Json<Meal>)> {
    let name = validation::name("name", &body.name)?;
    let meal = repo::insert_meal(&state.db, user_id, &name).await?;
    info!(%user_id, meal_id = %meal.id, "meal created");
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !repo::delete_meal(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Meal"));
    }
    info!(%user_id, meal_id = %id, "meal deleted, portions kept without meal");
    Ok(StatusCode::NO_CONTENT)
}
