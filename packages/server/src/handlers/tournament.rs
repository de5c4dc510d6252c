use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{bracket_match, dance_performance, point_entry, tournament};
use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::models::tournament::*;
use crate::state::AppState;

use super::find_tournament;

#[utoipa::path(
    post,
    path = "/",
    tag = "Tournaments",
    operation_id = "createTournament",
    summary = "Create a tournament",
    request_body = CreateTournamentRequest,
    responses(
        (status = 201, description = "Tournament created", body = TournamentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_tournament(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTournamentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_tournament(&payload)?;

    let new_tournament = tournament::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        year: Set(payload.year),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_tournament.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(TournamentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Tournaments",
    operation_id = "listTournaments",
    summary = "List tournaments",
    responses(
        (status = 200, description = "List of tournaments", body = Vec<TournamentResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_tournaments(
    State(state): State<AppState>,
) -> Result<Json<Vec<TournamentResponse>>, AppError> {
    let tournaments = tournament::Entity::find()
        .order_by_desc(tournament::Column::Year)
        .order_by_asc(tournament::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(
        tournaments.into_iter().map(TournamentResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Tournaments",
    operation_id = "getTournament",
    summary = "Get a tournament by ID",
    params(("id" = i32, Path, description = "Tournament ID")),
    responses(
        (status = 200, description = "Tournament details", body = TournamentResponse),
        (status = 404, description = "Tournament not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TournamentResponse>, AppError> {
    let model = find_tournament(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Tournaments",
    operation_id = "updateTournament",
    summary = "Update a tournament",
    params(("id" = i32, Path, description = "Tournament ID")),
    request_body = UpdateTournamentRequest,
    responses(
        (status = 200, description = "Tournament updated", body = TournamentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Tournament not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_tournament(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateTournamentRequest>,
) -> Result<Json<TournamentResponse>, AppError> {
    validate_update_tournament(&payload)?;

    if payload == UpdateTournamentRequest::default() {
        let existing = find_tournament(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_tournament(&txn, id).await?;

    let mut active: tournament::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(year) = payload.year {
        active.year = Set(year);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Tournaments",
    operation_id = "deleteTournament",
    summary = "Delete a tournament",
    description = "Permanently deletes a tournament and cascade-deletes its matches, dance performances and point entries.",
    params(("id" = i32, Path, description = "Tournament ID")),
    responses(
        (status = 204, description = "Tournament deleted"),
        (status = 404, description = "Tournament not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_tournament(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    find_tournament(&txn, id).await?;

    bracket_match::Entity::delete_many()
        .filter(bracket_match::Column::TournamentId.eq(id))
        .exec(&txn)
        .await?;
    dance_performance::Entity::delete_many()
        .filter(dance_performance::Column::TournamentId.eq(id))
        .exec(&txn)
        .await?;
    point_entry::Entity::delete_many()
        .filter(point_entry::Column::TournamentId.eq(id))
        .exec(&txn)
        .await?;
    tournament::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(tournament_id = id, "tournament deleted with its matches, dances and point entries");
    Ok(StatusCode::NO_CONTENT)
}
