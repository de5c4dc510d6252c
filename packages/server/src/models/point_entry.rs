use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::point_entry::OccurrenceKind;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePointEntryRequest {
    pub team_id: i32,
    pub kind: OccurrenceKind,
    /// Positive for donations, negative for penalties.
    pub points: i32,
    #[serde(default)]
    pub note: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdatePointEntryRequest {
    pub kind: Option<OccurrenceKind>,
    pub points: Option<i32>,
    pub note: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PointEntryResponse {
    pub id: i32,
    pub tournament_id: i32,
    pub team_id: i32,
    pub kind: OccurrenceKind,
    pub points: i32,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::point_entry::Model> for PointEntryResponse {
    fn from(m: crate::entity::point_entry::Model) -> Self {
        Self {
            id: m.id,
            tournament_id: m.tournament_id,
            team_id: m.team_id,
            kind: m.kind,
            points: m.points,
            note: m.note,
            created_at: m.created_at,
        }
    }
}

/// Enforce the sign convention on the kind/points pair that would be
/// stored: donations positive, penalties negative. Checked on create
/// and on every edit so the ranking can stay a plain sum.
pub fn validate_entry(kind: OccurrenceKind, points: i32, note: &str) -> Result<(), AppError> {
    if !kind.sign_ok(points) {
        return Err(match kind {
            OccurrenceKind::Donation => {
                AppError::Validation("Donation points must be positive".into())
            }
            OccurrenceKind::Penalty => AppError::Validation(
                "Penalty points must be negative (the deducted value)".into(),
            ),
        });
    }
    if note.chars().count() > 500 {
        return Err(AppError::Validation("note must be at most 500 characters".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_convention_enforced_on_entry() {
        assert!(validate_entry(OccurrenceKind::Donation, 50, "").is_ok());
        assert!(validate_entry(OccurrenceKind::Donation, -50, "").is_err());
        assert!(validate_entry(OccurrenceKind::Donation, 0, "").is_err());
        assert!(validate_entry(OccurrenceKind::Penalty, -30, "").is_ok());
        assert!(validate_entry(OccurrenceKind::Penalty, 30, "").is_err());
        assert!(validate_entry(OccurrenceKind::Penalty, 0, "").is_err());
    }

    #[test]
    fn note_length_bounded() {
        assert!(validate_entry(OccurrenceKind::Donation, 1, &"x".repeat(501)).is_err());
    }
}
