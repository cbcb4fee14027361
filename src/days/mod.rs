//! Daily totals: aggregation of portions, calorie classification and the
//! calendar feed built from both.

pub mod aggregate;
pub mod calendar;
pub mod dto;
mod error;
pub mod handlers;
pub mod rounding;

use crate::state::AppState;
use axum::Router;

pub use aggregate::{split_portions_by_day, split_portions_by_meal, DayTotal, MealTotal};
pub use calendar::{classify, classify_and_build_event, CalendarDayEvent, Severity};
pub use error::NutritionError;

pub fn router() -> Router<AppState> {
    handlers::day_routes()
}
