use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};

use super::{
    aggregate::{split_portions_by_day, split_portions_by_meal, DayTotal},
    calendar::{classify_and_build_event, CalendarDayEvent},
    dto::{parse_day, DateWindow, DayDetail, EventsQuery},
    rounding::round_half_up_01,
};
use crate::{
    auth::AuthUser,
    dates::today_utc,
    error::ApiResult,
    portions::{repo::fetch_portions, repo_types::into_portions},
    preferences::current_preferences,
    state::AppState,
};

pub fn day_routes() -> Router<AppState> {
    Router::new()
        .route("/days", get(list_days))
        .route("/days/:day", get(get_day))
        .route("/events", get(list_events))
}

/// Day totals from the last four weeks onwards, newest first.
#[instrument(skip(state))]
pub async fn list_days(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<DayTotal>>> {
    let since = DateWindow::ending(today_utc()).start;
    let rows = fetch_portions(&state.db, user_id, Some(since), None).await?;
    let portions = into_portions(rows)?;

    let mut days = split_portions_by_day(&portions)?;
    days.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(Json(days))
}

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(day): Path<String>,
) -> ApiResult<Json<DayDetail>> {
    let date = parse_day(&day)?;
    let rows = fetch_portions(&state.db, user_id, Some(date), Some(date)).await?;
    let portions = into_portions(rows)?;

    let meals = split_portions_by_meal(&portions)?;
    let calories = round_half_up_01(meals.iter().map(|m| m.calories).sum());
    Ok(Json(DayDetail {
        date,
        calories,
        meals,
    }))
}

/// Calendar feed: one event per day with logged portions inside the window.
#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<EventsQuery>,
) -> ApiResult<Json<Vec<CalendarDayEvent>>> {
    let window = query.window(today_utc())?;
    let rows = fetch_portions(&state.db, user_id, Some(window.start), Some(window.end)).await?;
    let portions = into_portions(rows)?;
    let days = split_portions_by_day(&portions)?;

    let prefs = current_preferences(&state.db, state.nutrition(), Some(user_id)).await?;
    let threshold = state.nutrition().warning_threshold;
    let events: Vec<_> = days
        .iter()
        .map(|day| classify_and_build_event(day, prefs.max_calories, threshold))
        .collect();

    debug!(
        %user_id,
        start = %window.start,
        end = %window.end,
        portions = portions.len(),
        events = events.len(),
        "calendar events built"
    );
    Ok(Json(events))
}
