use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Serde helper for PATCH semantics on nullable columns.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a trimmed name-like field (1..=max Unicode characters).
pub fn validate_name(value: &str, max: usize, field: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

/// Validate a school year. Wide bounds, just enough to catch typos
/// like 226 or 20026.
pub fn validate_year(year: i32) -> Result<(), AppError> {
    if !(2000..=2100).contains(&year) {
        return Err(AppError::Validation(
            "year must be between 2000 and 2100".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_bounds() {
        assert!(validate_name("Blue", 100, "name").is_ok());
        assert!(validate_name("  ", 100, "name").is_err());
        assert!(validate_name(&"x".repeat(101), 100, "name").is_err());
    }

    #[test]
    fn year_bounds() {
        assert!(validate_year(2026).is_ok());
        assert!(validate_year(226).is_err());
        assert!(validate_year(20026).is_err());
    }
}
