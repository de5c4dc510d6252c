use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{validate_name, validate_year};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTeamRequest {
    pub name: String,
    pub year: i32,
    /// Grade/series label, e.g. "1st grade".
    pub grade: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub grade: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct TeamListQuery {
    /// Restrict to teams of one school year.
    pub year: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamResponse {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub grade: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::team::Model> for TeamResponse {
    fn from(m: crate::entity::team::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            year: m.year,
            grade: m.grade,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_team(req: &CreateTeamRequest) -> Result<(), AppError> {
    validate_name(&req.name, 100, "name")?;
    validate_name(&req.grade, 20, "grade")?;
    validate_year(req.year)
}

pub fn validate_update_team(req: &UpdateTeamRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, 100, "name")?;
    }
    if let Some(ref grade) = req.grade {
        validate_name(grade, 20, "grade")?;
    }
    if let Some(year) = req.year {
        validate_year(year)?;
    }
    Ok(())
}
