use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_name;
use crate::entity::modality::Category;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateModalityRequest {
    pub name: String,
    pub category: Category,
    pub has_score: bool,
    #[serde(default)]
    pub has_sets: bool,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateModalityRequest {
    pub name: Option<String>,
    pub category: Option<Category>,
    /// Frozen once any match references the modality.
    pub has_score: Option<bool>,
    /// Frozen once any match references the modality.
    pub has_sets: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ModalityResponse {
    pub id: i32,
    pub name: String,
    pub category: Category,
    pub has_score: bool,
    pub has_sets: bool,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::modality::Model> for ModalityResponse {
    fn from(m: crate::entity::modality::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            category: m.category,
            has_score: m.has_score,
            has_sets: m.has_sets,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_modality(req: &CreateModalityRequest) -> Result<(), AppError> {
    validate_name(&req.name, 100, "name")?;
    validate_flags(req.has_score, req.has_sets)
}

pub fn validate_update_modality(req: &UpdateModalityRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, 100, "name")?;
    }
    Ok(())
}

/// Set tracking only makes sense for scored modalities.
pub fn validate_flags(has_score: bool, has_sets: bool) -> Result<(), AppError> {
    if has_sets && !has_score {
        return Err(AppError::Validation(
            "has_sets requires has_score".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_require_score() {
        assert!(validate_flags(true, true).is_ok());
        assert!(validate_flags(true, false).is_ok());
        assert!(validate_flags(false, false).is_ok());
        assert!(validate_flags(false, true).is_err());
    }
}
