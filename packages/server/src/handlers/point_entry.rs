use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{point_entry, team};
use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::models::point_entry::*;
use crate::state::AppState;

use super::find_tournament;

#[utoipa::path(
    post,
    path = "/",
    tag = "Points",
    operation_id = "createPointEntry",
    summary = "Record a bonus or penalty",
    description = "Creates a point entry. Donations must carry positive points, penalties negative, so the ranking stays a plain sum. The recorded timestamp is set once and never changes.",
    params(("id" = i32, Path, description = "Tournament ID")),
    request_body = CreatePointEntryRequest,
    responses(
        (status = 201, description = "Entry recorded", body = PointEntryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Tournament or team not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(tournament_id))]
pub async fn create_point_entry(
    State(state): State<AppState>,
    Path(tournament_id): Path<i32>,
    AppJson(payload): AppJson<CreatePointEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_entry(payload.kind, payload.points, &payload.note)?;

    let txn = state.db.begin().await?;
    find_tournament(&txn, tournament_id).await?;
    find_team(&txn, payload.team_id).await?;

    let new_entry = point_entry::ActiveModel {
        tournament_id: Set(tournament_id),
        team_id: Set(payload.team_id),
        kind: Set(payload.kind),
        points: Set(payload.points),
        note: Set(payload.note.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_entry.insert(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        entry_id = model.id,
        team_id = model.team_id,
        kind = %model.kind,
        points = model.points,
        "point entry recorded"
    );

    Ok((StatusCode::CREATED, Json(PointEntryResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Points",
    operation_id = "listPointEntries",
    summary = "List point entries of a tournament",
    params(("id" = i32, Path, description = "Tournament ID")),
    responses(
        (status = 200, description = "List of entries", body = Vec<PointEntryResponse>),
        (status = 404, description = "Tournament not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(tournament_id))]
pub async fn list_point_entries(
    State(state): State<AppState>,
    Path(tournament_id): Path<i32>,
) -> Result<Json<Vec<PointEntryResponse>>, AppError> {
    find_tournament(&state.db, tournament_id).await?;

    let entries = point_entry::Entity::find()
        .filter(point_entry::Column::TournamentId.eq(tournament_id))
        .order_by_asc(point_entry::Column::CreatedAt)
        .order_by_asc(point_entry::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        entries.into_iter().map(PointEntryResponse::from).collect(),
    ))
}

#[utoipa::path(
    patch,
    path = "/{entry_id}",
    tag = "Points",
    operation_id = "updatePointEntry",
    summary = "Update a point entry",
    description = "Edits kind, points or note. The sign convention is re-checked against the values that would be stored; the recorded timestamp is immutable.",
    params(
        ("id" = i32, Path, description = "Tournament ID"),
        ("entry_id" = i32, Path, description = "Entry ID"),
    ),
    request_body = UpdatePointEntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = PointEntryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Entry not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(tournament_id, entry_id))]
pub async fn update_point_entry(
    State(state): State<AppState>,
    Path((tournament_id, entry_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<UpdatePointEntryRequest>,
) -> Result<Json<PointEntryResponse>, AppError> {
    if payload == UpdatePointEntryRequest::default() {
        let existing = find_entry(&state.db, tournament_id, entry_id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_entry(&txn, tournament_id, entry_id).await?;

    let effective_kind = payload.kind.unwrap_or(existing.kind);
    let effective_points = payload.points.unwrap_or(existing.points);
    let effective_note = payload.note.as_deref().unwrap_or(&existing.note);
    validate_entry(effective_kind, effective_points, effective_note)?;

    let mut active: point_entry::ActiveModel = existing.into();
    if let Some(kind) = payload.kind {
        active.kind = Set(kind);
    }
    if let Some(points) = payload.points {
        active.points = Set(points);
    }
    if let Some(ref note) = payload.note {
        active.note = Set(note.trim().to_string());
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{entry_id}",
    tag = "Points",
    operation_id = "deletePointEntry",
    summary = "Delete a point entry",
    params(
        ("id" = i32, Path, description = "Tournament ID"),
        ("entry_id" = i32, Path, description = "Entry ID"),
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Entry not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(tournament_id, entry_id))]
pub async fn delete_point_entry(
    State(state): State<AppState>,
    Path((tournament_id, entry_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_entry(&txn, tournament_id, entry_id).await?;
    let active: point_entry::ActiveModel = existing.into();
    active.delete(&txn).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_entry<C: ConnectionTrait>(
    db: &C,
    tournament_id: i32,
    id: i32,
) -> Result<point_entry::Model, AppError> {
    point_entry::Entity::find_by_id(id)
        .filter(point_entry::Column::TournamentId.eq(tournament_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Point entry not found".into()))
}

async fn find_team<C: ConnectionTrait>(db: &C, id: i32) -> Result<team::Model, AppError> {
    team::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))
}
