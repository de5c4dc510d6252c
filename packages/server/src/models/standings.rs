use serde::Serialize;

use crate::standings::TeamPoints;

/// One row of a standings response. Position is 1-based; teams with
/// equal points still occupy distinct positions, ordered by name.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StandingsRow {
    pub position: usize,
    pub team_id: i32,
    pub team: String,
    pub points: i64,
}

pub fn standings_rows(points: Vec<TeamPoints>) -> Vec<StandingsRow> {
    points
        .into_iter()
        .enumerate()
        .map(|(i, row)| StandingsRow {
            position: i + 1,
            team_id: row.team_id,
            team: row.team,
            points: row.points,
        })
        .collect()
}
