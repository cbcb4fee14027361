use serde::Serialize;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::repo::{find_preferences, Preferences};
use crate::config::NutritionConfig;

/// Preferences in effect for a request, every field resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectivePreferences {
    pub max_calories: f64,
    pub theme: String,
}

/// Field-by-field fallback: a missing row, a null or non-positive
/// `max_calories` and a null or blank `theme` each use the default.
pub fn resolve_preferences(
    defaults: &NutritionConfig,
    stored: Option<&Preferences>,
) -> EffectivePreferences {
    let max_calories = stored
        .and_then(|p| p.max_calories)
        .filter(|max| max.is_finite() && *max > 0.0)
        .unwrap_or(defaults.default_max_calories);
    let theme = stored
        .and_then(|p| p.theme.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&defaults.default_theme)
        .to_string();

    EffectivePreferences {
        max_calories,
        theme,
    }
}

/// Anonymous callers get the defaults without a lookup; a user without a
/// preferences row is not an error.
pub async fn current_preferences(
    db: &PgPool,
    defaults: &NutritionConfig,
    user_id: Option<Uuid>,
) -> anyhow::Result<EffectivePreferences> {
    let Some(user_id) = user_id else {
        return Ok(resolve_preferences(defaults, None));
    };

    let stored = find_preferences(db, user_id).await?;
    debug!(%user_id, found = stored.is_some(), "preferences lookup");
    Ok(resolve_preferences(defaults, stored.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(max_calories: Option<f64>, theme: Option<&str>) -> Preferences {
        Preferences {
            user_id: Uuid::new_v4(),
            max_calories,
            theme: theme.map(str::to_string),
        }
    }

    #[test]
    fn missing_row_resolves_to_defaults() {
        let prefs = resolve_preferences(&NutritionConfig::default(), None);
        assert_eq!(
            prefs,
            EffectivePreferences {
                max_calories: 2000.0,
                theme: "light".into()
            }
        );
    }

    #[test]
    fn fields_fall_back_independently() {
        let defaults = NutritionConfig::default();

        let only_max = resolve_preferences(&defaults, Some(&stored(Some(1800.0), None)));
        assert_eq!(only_max.max_calories, 1800.0);
        assert_eq!(only_max.theme, "light");

        let only_theme = resolve_preferences(&defaults, Some(&stored(None, Some("dracula"))));
        assert_eq!(only_theme.max_calories, 2000.0);
        assert_eq!(only_theme.theme, "dracula");
    }

    #[test]
    fn zero_limit_and_blank_theme_count_as_unset() {
        let prefs = resolve_preferences(
            &NutritionConfig::default(),
            Some(&stored(Some(0.0), Some("  "))),
        );
        assert_eq!(prefs.max_calories, 2000.0);
        assert_eq!(prefs.theme, "light");
    }

    #[test]
    fn configured_defaults_are_used() {
        let defaults = NutritionConfig {
            default_max_calories: 2500.0,
            default_theme: "nord".into(),
            ..NutritionConfig::default()
        };
        let prefs = resolve_preferences(&defaults, None);
        assert_eq!(prefs.max_calories, 2500.0);
        assert_eq!(prefs.theme, "nord");
    }

    #[tokio::test]
    async fn anonymous_caller_never_touches_the_store() {
        let state = crate::state::AppState::fake();
        let prefs = current_preferences(&state.db, state.nutrition(), None)
            .await
            .expect("defaults for anonymous");
        assert_eq!(prefs.max_calories, 2000.0);
        assert_eq!(prefs.theme, "light");
    }
}
