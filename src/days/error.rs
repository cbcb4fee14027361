use thiserror::Error;
use uuid::Uuid;

/// Broken references found while resolving portions. Fatal to the whole aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NutritionError {
    #[error("portion {portion_id} references a food that does not exist")]
    MissingFood { portion_id: Uuid },

    #[error("portion {portion_id} references meal {meal_id} that does not exist")]
    MissingMeal { portion_id: Uuid, meal_id: Uuid },
}
