use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{dance_performance, team};
use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::models::dance::*;
use crate::state::AppState;

use super::find_tournament;

#[utoipa::path(
    post,
    path = "/",
    tag = "Dance",
    operation_id = "createDancePerformance",
    summary = "Record a dance performance",
    params(("id" = i32, Path, description = "Tournament ID")),
    request_body = CreateDanceRequest,
    responses(
        (status = 201, description = "Performance recorded", body = DanceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Tournament or team not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(tournament_id))]
pub async fn create_dance(
    State(state): State<AppState>,
    Path(tournament_id): Path<i32>,
    AppJson(payload): AppJson<CreateDanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_placement(payload.placement)?;

    let txn = state.db.begin().await?;
    find_tournament(&txn, tournament_id).await?;
    find_team(&txn, payload.team_id).await?;

    let new_dance = dance_performance::ActiveModel {
        tournament_id: Set(tournament_id),
        team_id: Set(payload.team_id),
        date: Set(payload.date),
        time: Set(payload.time),
        placement: Set(payload.placement),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_dance.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(DanceResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Dance",
    operation_id = "listDancePerformances",
    summary = "List dance performances",
    description = "Returns the tournament's dance performances, optionally filtered by a placement range.",
    params(("id" = i32, Path, description = "Tournament ID"), DanceListQuery),
    responses(
        (status = 200, description = "List of performances", body = Vec<DanceResponse>),
        (status = 404, description = "Tournament not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(tournament_id))]
pub async fn list_dances(
    State(state): State<AppState>,
    Path(tournament_id): Path<i32>,
    Query(query): Query<DanceListQuery>,
) -> Result<Json<Vec<DanceResponse>>, AppError> {
    find_tournament(&state.db, tournament_id).await?;

    let mut select = dance_performance::Entity::find()
        .filter(dance_performance::Column::TournamentId.eq(tournament_id));
    if let Some(min) = query.placement_min {
        select = select.filter(dance_performance::Column::Placement.gte(min));
    }
    if let Some(max) = query.placement_max {
        select = select.filter(dance_performance::Column::Placement.lte(max));
    }

    let dances = select
        .order_by_asc(dance_performance::Column::Placement)
        .order_by_asc(dance_performance::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(dances.into_iter().map(DanceResponse::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/{dance_id}",
    tag = "Dance",
    operation_id = "updateDancePerformance",
    summary = "Update a dance performance",
    params(
        ("id" = i32, Path, description = "Tournament ID"),
        ("dance_id" = i32, Path, description = "Performance ID"),
    ),
    request_body = UpdateDanceRequest,
    responses(
        (status = 200, description = "Performance updated", body = DanceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Performance not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(tournament_id, dance_id))]
pub async fn update_dance(
    State(state): State<AppState>,
    Path((tournament_id, dance_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<UpdateDanceRequest>,
) -> Result<Json<DanceResponse>, AppError> {
    if let Some(placement) = payload.placement {
        validate_placement(placement)?;
    }

    if payload == UpdateDanceRequest::default() {
        let existing = find_dance(&state.db, tournament_id, dance_id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_dance(&txn, tournament_id, dance_id).await?;

    if let Some(team_id) = payload.team_id {
        find_team(&txn, team_id).await?;
    }

    let mut active: dance_performance::ActiveModel = existing.into();
    if let Some(team_id) = payload.team_id {
        active.team_id = Set(team_id);
    }
    if let Some(date) = payload.date {
        active.date = Set(date);
    }
    if let Some(time) = payload.time {
        active.time = Set(time);
    }
    if let Some(placement) = payload.placement {
        active.placement = Set(placement);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{dance_id}",
    tag = "Dance",
    operation_id = "deleteDancePerformance",
    summary = "Delete a dance performance",
    params(
        ("id" = i32, Path, description = "Tournament ID"),
        ("dance_id" = i32, Path, description = "Performance ID"),
    ),
    responses(
        (status = 204, description = "Performance deleted"),
        (status = 404, description = "Performance not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(tournament_id, dance_id))]
pub async fn delete_dance(
    State(state): State<AppState>,
    Path((tournament_id, dance_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_dance(&txn, tournament_id, dance_id).await?;
    let active: dance_performance::ActiveModel = existing.into();
    active.delete(&txn).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_dance<C: ConnectionTrait>(
    db: &C,
    tournament_id: i32,
    id: i32,
) -> Result<dance_performance::Model, AppError> {
    dance_performance::Entity::find_by_id(id)
        .filter(dance_performance::Column::TournamentId.eq(tournament_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Dance performance not found".into()))
}

async fn find_team<C: ConnectionTrait>(db: &C, id: i32) -> Result<team::Model, AppError> {
    team::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))
}
