use crate::error::{ApiError, ApiResult};

pub const MAX_TEXT_LEN: usize = 200;

/// Trims a required name and checks it fits the column.
pub fn name(field: &str, value: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(ApiError::BadRequest(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Optional free text, empty allowed.
pub fn note(value: Option<&str>) -> ApiResult<String> {
    let note = value.map(str::trim).unwrap_or_default();
    if note.chars().count() > MAX_TEXT_LEN {
        return Err(ApiError::BadRequest(format!(
            "note must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(note.to_string())
}

pub fn positive(field: &str, value: f64) -> ApiResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!("{field} must be a positive number")))
    }
}

pub fn non_negative(field: &str, value: f64) -> ApiResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!("{field} must not be negative")))
    }
}
