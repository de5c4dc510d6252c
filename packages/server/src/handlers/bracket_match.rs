use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::bracket;
use crate::entity::{bracket_match, modality};
use crate::error::{AppError, ErrorBody, FieldError};
use crate::extractors::AppJson;
use crate::models::bracket_match::*;
use crate::state::AppState;

use super::find_tournament;

#[utoipa::path(
    post,
    path = "/",
    tag = "Matches",
    operation_id = "createMatch",
    summary = "Create a bracket match",
    description = "Creates a match at a fixed bracket slot. Teams may be left open for slots that are filled by propagation. Each (tournament, modality, slot) combination is unique.",
    params(("id" = i32, Path, description = "Tournament ID")),
    request_body = CreateMatchRequest,
    responses(
        (status = 201, description = "Match created", body = MatchResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Tournament or modality not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slot already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(tournament_id))]
pub async fn create_match(
    State(state): State<AppState>,
    Path(tournament_id): Path<i32>,
    AppJson(payload): AppJson<CreateMatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    find_tournament(&txn, tournament_id).await?;
    let modality = find_modality(&txn, payload.modality_id).await?;

    let now = chrono::Utc::now();
    let candidate = bracket_match::Model {
        id: 0,
        tournament_id,
        modality_id: payload.modality_id,
        stage: payload.stage,
        slot: payload.slot,
        date: payload.date,
        time: payload.time,
        team_a_id: payload.team_a_id,
        team_b_id: payload.team_b_id,
        started: false,
        walkover: None,
        walkover_team_id: None,
        score_a: None,
        score_b: None,
        set1_a: None,
        set1_b: None,
        set2_a: None,
        set2_b: None,
        set3_a: None,
        set3_b: None,
        tied: None,
        tiebreak_a: None,
        tiebreak_b: None,
        closed: false,
        winner_id: None,
        created_at: now,
        updated_at: now,
    };
    let errors = bracket::validate(&candidate, &modality);
    if !errors.is_empty() {
        return Err(AppError::Invalid(errors));
    }

    let new_match = bracket_match::ActiveModel {
        tournament_id: Set(tournament_id),
        modality_id: Set(payload.modality_id),
        stage: Set(payload.stage),
        slot: Set(payload.slot),
        date: Set(payload.date),
        time: Set(payload.time),
        team_a_id: Set(payload.team_a_id),
        team_b_id: Set(payload.team_b_id),
        started: Set(false),
        closed: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_match.insert(&txn).await {
        Ok(model) => {
            txn.commit().await?;
            Ok((StatusCode::CREATED, Json(MatchResponse::from(model))))
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(slot_taken())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Matches",
    operation_id = "listMatches",
    summary = "List matches of a tournament",
    description = "Returns the tournament's matches ordered by date, optionally filtered by modality, stage and closed state.",
    params(("id" = i32, Path, description = "Tournament ID"), MatchListQuery),
    responses(
        (status = 200, description = "List of matches", body = Vec<MatchResponse>),
        (status = 404, description = "Tournament not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(tournament_id))]
pub async fn list_matches(
    State(state): State<AppState>,
    Path(tournament_id): Path<i32>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<Vec<MatchResponse>>, AppError> {
    find_tournament(&state.db, tournament_id).await?;

    let mut select = bracket_match::Entity::find()
        .filter(bracket_match::Column::TournamentId.eq(tournament_id));
    if let Some(modality_id) = query.modality_id {
        select = select.filter(bracket_match::Column::ModalityId.eq(modality_id));
    }
    if let Some(stage) = query.stage {
        select = select.filter(bracket_match::Column::Stage.eq(stage));
    }
    if let Some(closed) = query.closed {
        select = select.filter(bracket_match::Column::Closed.eq(closed));
    }

    let matches = select
        .order_by_asc(bracket_match::Column::Date)
        .order_by_asc(bracket_match::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(matches.into_iter().map(MatchResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{match_id}",
    tag = "Matches",
    operation_id = "getMatch",
    summary = "Get a match by ID",
    params(
        ("id" = i32, Path, description = "Tournament ID"),
        ("match_id" = i32, Path, description = "Match ID"),
    ),
    responses(
        (status = 200, description = "Match details", body = MatchResponse),
        (status = 404, description = "Match not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(tournament_id, match_id))]
pub async fn get_match(
    State(state): State<AppState>,
    Path((tournament_id, match_id)): Path<(i32, i32)>,
) -> Result<Json<MatchResponse>, AppError> {
    let model = find_match(&state.db, tournament_id, match_id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{match_id}",
    tag = "Matches",
    operation_id = "updateMatch",
    summary = "Update an open match",
    description = "Partially updates a match with PATCH semantics (absent = keep, null = clear). The whole candidate state is re-checked against the modality rules; all failures are reported together. Closed matches must be reopened first; `closed` and `winner_id` can only change through the close/reopen operations.",
    params(
        ("id" = i32, Path, description = "Tournament ID"),
        ("match_id" = i32, Path, description = "Match ID"),
    ),
    request_body = UpdateMatchRequest,
    responses(
        (status = 200, description = "Match updated", body = MatchResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Match not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Match closed, or slot already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(tournament_id, match_id))]
pub async fn update_match(
    State(state): State<AppState>,
    Path((tournament_id, match_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<UpdateMatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    if payload == UpdateMatchRequest::default() {
        let existing = find_match(&state.db, tournament_id, match_id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_match_for_update(&txn, tournament_id, match_id).await?;
    if existing.closed {
        return Err(AppError::Conflict(
            "Match is closed; reopen it before editing".into(),
        ));
    }

    let modality = find_modality(&txn, existing.modality_id).await?;
    let candidate = payload.merged_into(&existing);
    let errors = bracket::validate(&candidate, &modality);
    if !errors.is_empty() {
        return Err(AppError::Invalid(errors));
    }

    let mut active: bracket_match::ActiveModel = existing.into();
    if let Some(stage) = payload.stage {
        active.stage = Set(stage);
    }
    if let Some(slot) = payload.slot {
        active.slot = Set(slot);
    }
    if let Some(date) = payload.date {
        active.date = Set(date);
    }
    if let Some(time) = payload.time {
        active.time = Set(time);
    }
    if let Some(team_a_id) = payload.team_a_id {
        active.team_a_id = Set(team_a_id);
    }
    if let Some(team_b_id) = payload.team_b_id {
        active.team_b_id = Set(team_b_id);
    }
    if let Some(started) = payload.started {
        active.started = Set(started);
    }
    if let Some(walkover) = payload.walkover {
        active.walkover = Set(walkover);
    }
    if let Some(walkover_team_id) = payload.walkover_team_id {
        active.walkover_team_id = Set(walkover_team_id);
    }
    if let Some(score_a) = payload.score_a {
        active.score_a = Set(score_a);
    }
    if let Some(score_b) = payload.score_b {
        active.score_b = Set(score_b);
    }
    if let Some(set1_a) = payload.set1_a {
        active.set1_a = Set(set1_a);
    }
    if let Some(set1_b) = payload.set1_b {
        active.set1_b = Set(set1_b);
    }
    if let Some(set2_a) = payload.set2_a {
        active.set2_a = Set(set2_a);
    }
    if let Some(set2_b) = payload.set2_b {
        active.set2_b = Set(set2_b);
    }
    if let Some(set3_a) = payload.set3_a {
        active.set3_a = Set(set3_a);
    }
    if let Some(set3_b) = payload.set3_b {
        active.set3_b = Set(set3_b);
    }
    if let Some(tied) = payload.tied {
        active.tied = Set(tied);
    }
    if let Some(tiebreak_a) = payload.tiebreak_a {
        active.tiebreak_a = Set(tiebreak_a);
    }
    if let Some(tiebreak_b) = payload.tiebreak_b {
        active.tiebreak_b = Set(tiebreak_b);
    }
    active.updated_at = Set(chrono::Utc::now());

    match active.update(&txn).await {
        Ok(model) => {
            txn.commit().await?;
            Ok(Json(model.into()))
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(slot_taken())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/{match_id}/close",
    tag = "Matches",
    operation_id = "closeMatch",
    summary = "Close a match and propagate its result",
    description = "Validates the match, resolves the winner and writes it into the next bracket slot (semifinals also send the loser to the third-place match), all in one transaction. For modalities without a score the winner must be supplied in the body; scored modalities derive it from the fields.",
    params(
        ("id" = i32, Path, description = "Tournament ID"),
        ("match_id" = i32, Path, description = "Match ID"),
    ),
    request_body = CloseMatchRequest,
    responses(
        (status = 200, description = "Match closed", body = MatchResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Match not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Match already closed (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(tournament_id, match_id))]
pub async fn close_match(
    State(state): State<AppState>,
    Path((tournament_id, match_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<CloseMatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_match_for_update(&txn, tournament_id, match_id).await?;
    if existing.closed {
        return Err(AppError::Conflict("Match is already closed".into()));
    }

    let modality = find_modality(&txn, existing.modality_id).await?;
    if payload.winner_id.is_some() && modality.has_score {
        return Err(AppError::invalid_field(
            "winner_id",
            "The winner is derived from the score for this modality",
        ));
    }

    let mut candidate = existing.clone();
    candidate.closed = true;
    if !modality.has_score {
        candidate.winner_id = payload.winner_id;
    }

    let errors = bracket::validate(&candidate, &modality);
    if !errors.is_empty() {
        return Err(AppError::Invalid(errors));
    }
    let Some(winner) = bracket::resolve_winner(&candidate, &modality) else {
        return Err(AppError::invalid_field(
            "winner_id",
            "A winner could not be determined from the match fields",
        ));
    };

    let mut active: bracket_match::ActiveModel = existing.into();
    active.closed = Set(true);
    active.winner_id = Set(Some(winner));
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&txn).await?;

    let writes = bracket::plan(&model, Some(winner));
    bracket::apply(&txn, model.tournament_id, model.modality_id, &writes).await?;
    txn.commit().await?;

    tracing::info!(
        match_id = model.id,
        winner_id = winner,
        stage = %model.stage,
        slot = %model.slot,
        "match closed"
    );

    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{match_id}/reopen",
    tag = "Matches",
    operation_id = "reopenMatch",
    summary = "Reopen a closed match",
    description = "Clears the winner and removes the match's contribution from the downstream bracket slot(s), in one transaction.",
    params(
        ("id" = i32, Path, description = "Tournament ID"),
        ("match_id" = i32, Path, description = "Match ID"),
    ),
    responses(
        (status = 200, description = "Match reopened", body = MatchResponse),
        (status = 404, description = "Match not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Match is not closed (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(tournament_id, match_id))]
pub async fn reopen_match(
    State(state): State<AppState>,
    Path((tournament_id, match_id)): Path<(i32, i32)>,
) -> Result<Json<MatchResponse>, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_match_for_update(&txn, tournament_id, match_id).await?;
    if !existing.closed {
        return Err(AppError::Conflict("Match is not closed".into()));
    }

    let mut active: bracket_match::ActiveModel = existing.into();
    active.closed = Set(false);
    active.winner_id = Set(None);
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&txn).await?;

    let writes = bracket::plan(&model, None);
    bracket::apply(&txn, model.tournament_id, model.modality_id, &writes).await?;
    txn.commit().await?;

    tracing::info!(match_id = model.id, stage = %model.stage, slot = %model.slot, "match reopened");

    Ok(Json(model.into()))
}

fn slot_taken() -> AppError {
    AppError::UniqueViolation(FieldError::new(
        "slot",
        "A match already exists for this tournament, modality and slot",
    ))
}

async fn find_match<C: ConnectionTrait>(
    db: &C,
    tournament_id: i32,
    id: i32,
) -> Result<bracket_match::Model, AppError> {
    bracket_match::Entity::find_by_id(id)
        .filter(bracket_match::Column::TournamentId.eq(tournament_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Match not found".into()))
}

async fn find_match_for_update(
    txn: &DatabaseTransaction,
    tournament_id: i32,
    id: i32,
) -> Result<bracket_match::Model, AppError> {
    use sea_orm::sea_query::LockType;
    bracket_match::Entity::find_by_id(id)
        .filter(bracket_match::Column::TournamentId.eq(tournament_id))
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Match not found".into()))
}

async fn find_modality<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<modality::Model, AppError> {
    modality::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Modality not found".into()))
}
