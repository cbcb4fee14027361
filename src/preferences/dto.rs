use serde::{Deserialize, Serialize};

use super::services::EffectivePreferences;
use crate::{
    config::NutritionConfig,
    error::{ApiError, ApiResult},
};

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    #[serde(flatten)]
    pub effective: EffectivePreferences,
    pub available_themes: Vec<String>,
}

/// Full replacement; a null or missing field resets it to the default.
#[derive(Debug, Default, Deserialize)]
pub struct PreferencesBody {
    #[serde(default)]
    pub max_calories: Option<f64>,
    #[serde(default)]
    pub theme: Option<String>,
}

impl PreferencesBody {
    pub fn validate(self, config: &NutritionConfig) -> ApiResult<(Option<f64>, Option<String>)> {
        if let Some(max) = self.max_calories {
            if !(max.is_finite() && max > 0.0) {
                return Err(ApiError::BadRequest(
                    "max_calories must be a positive number".into(),
                ));
            }
        }
        let theme = self.theme.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        if let Some(theme) = &theme {
            if !config.is_known_theme(theme) {
                return Err(ApiError::BadRequest(format!("unknown theme {theme:?}")));
            }
        }
        Ok((self.max_calories, theme))
    }
}
