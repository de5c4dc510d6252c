use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateDanceRequest {
    pub team_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// 0 = disqualified, 1..=12 = rank.
    pub placement: i32,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateDanceRequest {
    pub team_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub placement: Option<i32>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct DanceListQuery {
    /// Lowest placement to include, e.g. 1.
    pub placement_min: Option<i32>,
    /// Highest placement to include, e.g. 4.
    pub placement_max: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DanceResponse {
    pub id: i32,
    pub tournament_id: i32,
    pub team_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub placement: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::dance_performance::Model> for DanceResponse {
    fn from(m: crate::entity::dance_performance::Model) -> Self {
        Self {
            id: m.id,
            tournament_id: m.tournament_id,
            team_id: m.team_id,
            date: m.date,
            time: m.time,
            placement: m.placement,
            created_at: m.created_at,
        }
    }
}

pub fn validate_placement(placement: i32) -> Result<(), AppError> {
    if !(0..=12).contains(&placement) {
        return Err(AppError::Validation(
            "placement must be 0 (disqualified) or 1-12".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_range() {
        assert!(validate_placement(0).is_ok());
        assert!(validate_placement(1).is_ok());
        assert!(validate_placement(12).is_ok());
        assert!(validate_placement(-1).is_err());
        assert!(validate_placement(13).is_err());
    }
}
