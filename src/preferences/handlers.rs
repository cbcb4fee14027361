use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use super::{
    dto::{PreferencesBody, PreferencesResponse},
    repo::upsert_preferences,
    services::{current_preferences, resolve_preferences},
};
use crate::{
    auth::{AuthUser, MaybeAuthUser},
    error::ApiResult,
    state::AppState,
};

pub fn preference_routes() -> Router<AppState> {
    Router::new().route("/preferences", get(get_preferences).put(put_preferences))
}

fn respond(state: &AppState, effective: super::services::EffectivePreferences) -> PreferencesResponse {
    PreferencesResponse {
        effective,
        available_themes: state.nutrition().themes.clone(),
    }
}

#[instrument(skip(state, caller))]
pub async fn get_preferences(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
) -> ApiResult<Json<PreferencesResponse>> {
    let effective = current_preferences(&state.db, state.nutrition(), caller.0).await?;
    Ok(Json(respond(&state, effective)))
}

#[instrument(skip(state, body))]
pub async fn put_preferences(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<PreferencesBody>,
) -> ApiResult<Json<PreferencesResponse>> {
    let (max_calories, theme) = body.validate(state.nutrition())?;
    let stored = upsert_preferences(&state.db, user_id, max_calories, theme.as_deref()).await?;
    info!(%user_id, ?max_calories, ?theme, "preferences saved");

    let effective = resolve_preferences(state.nutrition(), Some(&stored));
    Ok(Json(respond(&state, effective)))
}
