use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_MAX_CALORIES: f64 = 2000.0;
pub const DEFAULT_THEME: &str = "light";
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.1;

pub const AVAILABLE_THEMES: [&str; 32] = [
    "light",
    "dark",
    "cupcake",
    "bumblebee",
    "emerald",
    "corporate",
    "synthwave",
    "retro",
    "cyberpunk",
    "valentine",
    "halloween",
    "garden",
    "forest",
    "aqua",
    "lofi",
    "pastel",
    "fantasy",
    "wireframe",
    "black",
    "luxury",
    "dracula",
    "cmyk",
    "autumn",
    "business",
    "acid",
    "lemonade",
    "night",
    "coffee",
    "winter",
    "dim",
    "nord",
    "sunset",
];

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// System-wide fallbacks for user preferences and the calendar warning band.
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionConfig {
    pub default_max_calories: f64,
    pub default_theme: String,
    pub themes: Vec<String>,
    /// Fraction above `max_calories` still shown as "slightly over". Always > 0.
    pub warning_threshold: f64,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            default_max_calories: DEFAULT_MAX_CALORIES,
            default_theme: DEFAULT_THEME.into(),
            themes: AVAILABLE_THEMES.iter().map(|t| t.to_string()).collect(),
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
        }
    }
}

impl NutritionConfig {
    pub fn is_known_theme(&self, theme: &str) -> bool {
        self.themes.iter().any(|t| t == theme)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.warning_threshold.is_finite() && self.warning_threshold > 0.0,
            "WARNING_THRESHOLD must be a positive fraction, got {}",
            self.warning_threshold
        );
        anyhow::ensure!(
            self.default_max_calories.is_finite() && self.default_max_calories > 0.0,
            "DEFAULT_MAX_CALORIES must be positive, got {}",
            self.default_max_calories
        );
        anyhow::ensure!(
            self.is_known_theme(&self.default_theme),
            "DEFAULT_THEME {:?} is not one of the available themes",
            self.default_theme
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub nutrition: NutritionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "caltrack".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "caltrack-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES")?.unwrap_or(60),
            refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES")?.unwrap_or(60 * 24 * 14),
        };

        let mut nutrition = NutritionConfig::default();
        if let Some(max) = env_parse::<f64>("DEFAULT_MAX_CALORIES")? {
            nutrition.default_max_calories = max;
        }
        if let Ok(theme) = std::env::var("DEFAULT_THEME") {
            nutrition.default_theme = theme;
        }
        if let Some(threshold) = env_parse::<f64>("WARNING_THRESHOLD")? {
            nutrition.warning_threshold = threshold;
        }
        nutrition.validate()?;

        Ok(Self {
            database_url,
            jwt,
            nutrition,
        })
    }
}

/// Unset variables are `None`; set but unparsable ones are an error.
fn env_parse<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{key}={raw:?} is invalid: {e}")),
        Err(_) => Ok(None),
    }
}
