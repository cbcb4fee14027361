//! Groups portions into per-meal and per-day calorie totals.
//!
//! Group order follows the map key (meal name, then date ascending); callers
//! that care about order sort the result themselves.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use super::{rounding::round_half_up_01, NutritionError};
use crate::portions::model::Portion;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealTotal {
    pub name: String,
    /// Sum of the portions' calories, rounded half-up to one decimal.
    pub calories: f64,
    pub portions: Vec<Portion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotal {
    #[serde(with = "crate::dates::iso_date")]
    pub date: Date,
    /// Full-precision sum; not reconciled with the rounded meal totals.
    pub calories: f64,
    pub meals: Vec<MealTotal>,
}

#[derive(Default)]
struct Bucket<'a> {
    calories: f64,
    portions: Vec<&'a Portion>,
}

impl<'a> Bucket<'a> {
    fn add(&mut self, portion: &'a Portion) -> Result<(), NutritionError> {
        self.calories += portion.calories()?;
        self.portions.push(portion);
        Ok(())
    }
}

/// Groups portions by meal name (`"other"` when no meal is set).
///
/// Fails on the first portion whose food cannot be resolved.
pub fn split_portions_by_meal<'a, I>(portions: I) -> Result<Vec<MealTotal>, NutritionError>
where
    I: IntoIterator<Item = &'a Portion>,
{
    let mut meals: BTreeMap<&str, Bucket<'a>> = BTreeMap::new();
    for portion in portions {
        meals.entry(portion.meal.name()).or_default().add(portion)?;
    }

    Ok(meals
        .into_iter()
        .map(|(name, bucket)| MealTotal {
            name: name.to_string(),
            calories: round_half_up_01(bucket.calories),
            portions: bucket.portions.into_iter().cloned().collect(),
        })
        .collect())
}

/// Groups portions by date, one `DayTotal` per distinct date, each split by meal.
pub fn split_portions_by_day<'a, I>(portions: I) -> Result<Vec<DayTotal>, NutritionError>
where
    I: IntoIterator<Item = &'a Portion>,
{
    let mut days: BTreeMap<Date, Bucket<'a>> = BTreeMap::new();
    for portion in portions {
        days.entry(portion.date).or_default().add(portion)?;
    }

    days.into_iter()
        .map(|(date, bucket)| -> Result<DayTotal, NutritionError> {
            Ok(DayTotal {
                date,
                calories: bucket.calories,
                meals: split_portions_by_meal(bucket.portions)?,
            })
        })
        .collect()
}
