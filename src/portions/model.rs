use serde::Serialize;
use time::Date;
use uuid::Uuid;

use crate::days::NutritionError;

/// Bucket a portion is filed under when aggregating by meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MealRef {
    Named(String),
    Other,
}

impl MealRef {
    pub const OTHER_NAME: &'static str = "other";

    pub fn name(&self) -> &str {
        match self {
            MealRef::Named(name) => name,
            MealRef::Other => Self::OTHER_NAME,
        }
    }
}

/// The food side of a portion, as joined from `foods`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortionFood {
    pub id: Uuid,
    pub name: String,
    pub calories_per_unit: f64,
}

/// A logged consumption event with its references resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portion {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "crate::dates::iso_date")]
    pub date: Date,
    pub quantity: f64,
    pub note: String,
    /// `None` when the food row could not be joined.
    pub food: Option<PortionFood>,
    pub meal: MealRef,
}

impl Portion {
    pub fn calories(&self) -> Result<f64, NutritionError> {
        self.food
            .as_ref()
            .map(|food| food.calories_per_unit * self.quantity)
            .ok_or(NutritionError::MissingFood {
                portion_id: self.id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn portion(food: Option<PortionFood>, quantity: f64) -> Portion {
        Portion {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: date!(2024 - 05 - 01),
            quantity,
            note: String::new(),
            food,
            meal: MealRef::Other,
        }
    }

    #[test]
    fn calories_scale_with_quantity() {
        let food = PortionFood {
            id: Uuid::new_v4(),
            name: "bread".into(),
            calories_per_unit: 80.0,
        };
        assert_eq!(portion(Some(food), 2.5).calories().unwrap(), 200.0);
    }

    #[test]
    fn missing_food_is_an_error() {
        let p = portion(None, 1.0);
        assert_eq!(
            p.calories().unwrap_err(),
            NutritionError::MissingFood { portion_id: p.id }
        );
    }

    #[test]
    fn meal_ref_names() {
        assert_eq!(MealRef::Named("Breakfast".into()).name(), "Breakfast");
        assert_eq!(MealRef::Other.name(), "other");
        assert_eq!(serde_json::to_string(&MealRef::Other).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&MealRef::Named("Lunch".into())).unwrap(),
            "\"Lunch\""
        );
    }
}
