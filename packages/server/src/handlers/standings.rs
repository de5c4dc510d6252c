use axum::Json;
use axum::extract::{Path, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::modality;
use crate::error::{AppError, ErrorBody};
use crate::models::standings::{StandingsRow, standings_rows};
use crate::standings;
use crate::state::AppState;

use super::find_tournament;

#[utoipa::path(
    get,
    path = "/{id}/standings",
    tag = "Standings",
    operation_id = "getStandings",
    summary = "General ranking of a tournament",
    description = "Placement-based ranking: 1000/800 points from the final, 600/400 from the third-place match, the same table for dance placements 1-4, plus bonus/penalty entries. Every team of the tournament's year is listed, ordered by points descending with ties broken by name.",
    params(("id" = i32, Path, description = "Tournament ID")),
    responses(
        (status = 200, description = "Ranking rows", body = Vec<StandingsRow>),
        (status = 404, description = "Tournament not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(tournament_id))]
pub async fn get_standings(
    State(state): State<AppState>,
    Path(tournament_id): Path<i32>,
) -> Result<Json<Vec<StandingsRow>>, AppError> {
    let tournament = find_tournament(&state.db, tournament_id).await?;
    let rows = standings::placement_standings(&state.db, &tournament).await?;
    Ok(Json(standings_rows(rows)))
}

#[utoipa::path(
    get,
    path = "/{id}/standings/modalities/{modality_id}",
    tag = "Standings",
    operation_id = "getModalityStandings",
    summary = "Per-modality standings",
    description = "Alternative view for a single modality: each team's summed match scores plus one point per win, over closed non-walkover matches. Independent of the placement-based general ranking.",
    params(
        ("id" = i32, Path, description = "Tournament ID"),
        ("modality_id" = i32, Path, description = "Modality ID"),
    ),
    responses(
        (status = 200, description = "Ranking rows", body = Vec<StandingsRow>),
        (status = 404, description = "Tournament or modality not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(tournament_id, modality_id))]
pub async fn get_modality_standings(
    State(state): State<AppState>,
    Path((tournament_id, modality_id)): Path<(i32, i32)>,
) -> Result<Json<Vec<StandingsRow>>, AppError> {
    let tournament = find_tournament(&state.db, tournament_id).await?;
    modality::Entity::find_by_id(modality_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Modality not found".into()))?;

    let rows = standings::modality_standings(&state.db, &tournament, modality_id).await?;
    Ok(Json(standings_rows(rows)))
}
