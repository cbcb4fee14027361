use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

use super::model::{MealRef, Portion, PortionFood};
use crate::days::NutritionError;

/// A portion joined with its food and meal; joined columns are NULL when the
/// referenced row is missing.
#[derive(Debug, Clone, FromRow)]
pub struct PortionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub quantity: f64,
    pub note: String,
    pub food_id: Uuid,
    pub food_name: Option<String>,
    pub calories_per_unit: Option<f64>,
    pub meal_id: Option<Uuid>,
    pub meal_name: Option<String>,
}

impl TryFrom<PortionRow> for Portion {
    type Error = NutritionError;

    fn try_from(r: PortionRow) -> Result<Self, Self::Error> {
        let meal = match (r.meal_id, r.meal_name) {
            (None, _) => MealRef::Other,
            (Some(_), Some(name)) => MealRef::Named(name),
            (Some(meal_id), None) => {
                return Err(NutritionError::MissingMeal {
                    portion_id: r.id,
                    meal_id,
                })
            }
        };
        let food = match (r.food_name, r.calories_per_unit) {
            (Some(name), Some(calories_per_unit)) => Some(PortionFood {
                id: r.food_id,
                name,
                calories_per_unit,
            }),
            _ => None,
        };

        Ok(Portion {
            id: r.id,
            user_id: r.user_id,
            date: r.date,
            quantity: r.quantity,
            note: r.note,
            food,
            meal,
        })
    }
}

pub fn into_portions(rows: Vec<PortionRow>) -> Result<Vec<Portion>, NutritionError> {
    rows.into_iter().map(Portion::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn row() -> PortionRow {
        PortionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: date!(2024 - 02 - 10),
            quantity: 2.0,
            note: "half a loaf".into(),
            food_id: Uuid::new_v4(),
            food_name: Some("bread".into()),
            calories_per_unit: Some(80.0),
            meal_id: None,
            meal_name: None,
        }
    }

    #[test]
    fn resolved_row_without_meal_is_other() {
        let portion = Portion::try_from(row()).unwrap();
        assert_eq!(portion.meal, MealRef::Other);
        assert_eq!(portion.calories().unwrap(), 160.0);
    }

    #[test]
    fn named_meal_is_carried_over() {
        let mut r = row();
        r.meal_id = Some(Uuid::new_v4());
        r.meal_name = Some("Dinner".into());
        assert_eq!(Portion::try_from(r).unwrap().meal, MealRef::Named("Dinner".into()));
    }

    #[test]
    fn dangling_meal_reference_is_rejected() {
        let mut r = row();
        let meal_id = Uuid::new_v4();
        r.meal_id = Some(meal_id);
        let portion_id = r.id;
        assert_eq!(
            Portion::try_from(r).unwrap_err(),
            NutritionError::MissingMeal {
                portion_id,
                meal_id
            }
        );
    }

    #[test]
    fn dangling_food_surfaces_when_counting_calories() {
        let mut r = row();
        r.food_name = None;
        r.calories_per_unit = None;
        let portions = into_portions(vec![r]).unwrap();
        assert!(portions[0].food.is_none());
        assert!(portions[0].calories().is_err());
    }
}
