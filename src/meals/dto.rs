use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MealBody {
    pub name: String,
}
