use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use super::aggregate::MealTotal;
use crate::{
    dates::parse_iso_date,
    error::{ApiError, ApiResult},
};

/// How far back the overview and the event feed look by default.
pub const DEFAULT_LOOKBACK: Duration = Duration::weeks(4);

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Date,
    pub end: Date,
}

impl DateWindow {
    pub fn ending(end: Date) -> Self {
        Self {
            start: end - DEFAULT_LOOKBACK,
            end,
        }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Query of the event feed; calendar widgets send `start`/`end` as ISO dates
/// or date-times.
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl EventsQuery {
    pub fn window(&self, today: Date) -> ApiResult<DateWindow> {
        let defaults = DateWindow::ending(today);
        Ok(DateWindow {
            start: parse_param("start", self.start.as_deref())?.unwrap_or(defaults.start),
            end: parse_param("end", self.end.as_deref())?.unwrap_or(defaults.end),
        })
    }
}

fn parse_param(name: &str, raw: Option<&str>) -> ApiResult<Option<Date>> {
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| {
            parse_iso_date(s)
                .map_err(|e| ApiError::BadRequest(format!("invalid {name} date {s:?}: {e}")))
        })
        .transpose()
}

pub fn parse_day(raw: &str) -> ApiResult<Date> {
    parse_param("day", Some(raw))?
        .ok_or_else(|| ApiError::BadRequest("day must not be empty".into()))
}

/// Meals of a single day, with the day total taken from the rounded meal totals.
#[derive(Debug, Serialize)]
pub struct DayDetail {
    #[serde(with = "crate::dates::iso_date")]
    pub date: Date,
    pub calories: f64,
    pub meals: Vec<MealTotal>,
}
