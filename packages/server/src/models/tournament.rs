use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{validate_name, validate_year};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTournamentRequest {
    pub name: String,
    pub year: i32,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateTournamentRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TournamentResponse {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::tournament::Model> for TournamentResponse {
    fn from(m: crate::entity::tournament::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            year: m.year,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_tournament(req: &CreateTournamentRequest) -> Result<(), AppError> {
    validate_name(&req.name, 200, "name")?;
    validate_year(req.year)
}

pub fn validate_update_tournament(req: &UpdateTournamentRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, 200, "name")?;
    }
    if let Some(year) = req.year {
        validate_year(year)?;
    }
    Ok(())
}
