use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use super::repo::PortionFields;
use crate::{error::ApiResult, validation};

fn default_quantity() -> f64 {
    1.0
}

/// Body of create and edit; a missing date means today.
#[derive(Debug, Deserialize)]
pub struct PortionBody {
    #[serde(default, with = "crate::dates::iso_date::option")]
    pub date: Option<Date>,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub note: Option<String>,
    pub food_id: Uuid,
    #[serde(default)]
    pub meal_id: Option<Uuid>,
}

impl PortionBody {
    pub fn into_fields(self, today: Date) -> ApiResult<PortionFields> {
        Ok(PortionFields {
            date: self.date.unwrap_or(today),
            quantity: validation::positive("quantity", self.quantity)?,
            note: validation::note(self.note.as_deref())?,
            food_id: self.food_id,
            meal_id: self.meal_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 04 - 15);

    #[test]
    fn minimal_body_gets_defaults() {
        let food_id = Uuid::new_v4();
        let body: PortionBody =
            serde_json::from_value(serde_json::json!({ "food_id": food_id })).unwrap();
        let fields = body.into_fields(TODAY).unwrap();
        assert_eq!(fields.date, TODAY);
        assert_eq!(fields.quantity, 1.0);
        assert_eq!(fields.note, "");
        assert_eq!(fields.food_id, food_id);
        assert_eq!(fields.meal_id, None);
    }

    #[test]
    fn explicit_values_are_kept() {
        let meal_id = Uuid::new_v4();
        let body: PortionBody = serde_json::from_value(serde_json::json!({
            "date": "2024-04-01",
            "quantity": 0.5,
            "note": "small bowl",
            "food_id": Uuid::new_v4(),
            "meal_id": meal_id,
        }))
        .unwrap();
        let fields = body.into_fields(TODAY).unwrap();
        assert_eq!(fields.date, date!(2024 - 04 - 01));
        assert_eq!(fields.quantity, 0.5);
        assert_eq!(fields.note, "small bowl");
        assert_eq!(fields.meal_id, Some(meal_id));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let body: PortionBody = serde_json::from_value(serde_json::json!({
            "quantity": 0,
            "food_id": Uuid::new_v4(),
        }))
        .unwrap();
        assert!(body.into_fields(TODAY).is_err());
    }
}
