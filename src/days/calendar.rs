//! Classifies a day's calories against the user's limit and builds the
//! calendar event shown for it.

use serde::Serialize;
use time::Date;

use super::{aggregate::DayTotal, rounding::round_half_up};

/// Path of the day detail endpoint; events link to `{DAY_DETAIL_PATH}/{date}`.
pub const DAY_DETAIL_PATH: &str = "/api/v1/days";

const DISPLAY_MODE: &str = "auto";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Under,
    SlightlyOver,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStyle {
    pub background: &'static str,
    pub text: &'static str,
}

/// Indexed by `Severity as usize`.
const SEVERITY_STYLES: [EventStyle; 3] = [
    EventStyle {
        background: "green",
        text: "white",
    },
    EventStyle {
        background: "orange",
        text: "black",
    },
    EventStyle {
        background: "red",
        text: "white",
    },
];

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Under, Severity::SlightlyOver, Severity::Over];

    pub fn style(self) -> EventStyle {
        SEVERITY_STYLES[self as usize]
    }
}

/// `Under` below the limit, `SlightlyOver` up to `max * (1 + warning_threshold)`
/// inclusive, `Over` beyond that.
///
/// # Panics
///
/// When `warning_threshold` is not strictly positive.
pub fn classify(calories: f64, max_calories: f64, warning_threshold: f64) -> Severity {
    assert!(
        warning_threshold > 0.0,
        "warning threshold must be > 0, got {warning_threshold}"
    );

    if calories < max_calories {
        Severity::Under
    } else if calories <= max_calories * (1.0 + warning_threshold) {
        Severity::SlightlyOver
    } else {
        Severity::Over
    }
}

/// One all-day entry of the calendar feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDayEvent {
    pub title: String,
    #[serde(with = "crate::dates::iso_date")]
    pub start: Date,
    #[serde(with = "crate::dates::iso_date")]
    pub end: Date,
    pub description: String,
    pub all_day: bool,
    pub display: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub url: String,
    #[serde(skip)]
    pub severity: Severity,
}

pub fn classify_and_build_event(
    day: &DayTotal,
    max_calories: f64,
    warning_threshold: f64,
) -> CalendarDayEvent {
    let severity = classify(day.calories, max_calories, warning_threshold);
    let style = severity.style();

    CalendarDayEvent {
        title: round_half_up(day.calories).to_string(),
        start: day.date,
        end: day.date,
        // Debug keeps the trailing ".0" on whole numbers
        description: format!("{:?} calories", day.calories),
        all_day: true,
        display: DISPLAY_MODE,
        background_color: style.background,
        text_color: style.text,
        url: format!("{DAY_DETAIL_PATH}/{}", day.date),
        severity,
    }
}
