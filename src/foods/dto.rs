use serde::Deserialize;

use crate::{error::ApiResult, validation};

#[derive(Debug, Deserialize)]
pub struct FoodBody {
    pub name: String,
    pub calories_per_unit: f64,
}

impl FoodBody {
    /// Trimmed name and calories, validated.
    pub fn validate(&self) -> ApiResult<(String, f64)> {
        Ok((
            validation::name("name", &self.name)?,
            validation::non_negative("calories_per_unit", self.calories_per_unit)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_calorie_food() {
        let body = FoodBody {
            name: " Water ".into(),
            calories_per_unit: 0.0,
        };
        assert_eq!(body.validate().unwrap(), ("Water".to_string(), 0.0));
    }

    #[test]
    fn rejects_negative_calories_and_blank_names() {
        let negative = FoodBody {
            name: "Oats".into(),
            calories_per_unit: -5.0,
        };
        assert!(negative.validate().is_err());

        let blank = FoodBody {
            name: "  ".into(),
            calories_per_unit: 10.0,
        };
        assert!(blank.validate().is_err());
    }
}
