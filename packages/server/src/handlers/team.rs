use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{bracket_match, dance_performance, point_entry, team};
use crate::error::{AppError, ErrorBody, FieldError};
use crate::extractors::AppJson;
use crate::models::team::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Teams",
    operation_id = "createTeam",
    summary = "Create a team",
    description = "Creates a class team. Team names are unique within a school year.",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already used that year (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_team(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTeamRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_team(&payload)?;

    let new_team = team::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        year: Set(payload.year),
        grade: Set(payload.grade.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match new_team.insert(&state.db).await {
        Ok(model) => Ok((StatusCode::CREATED, Json(TeamResponse::from(model)))),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(name_taken())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Teams",
    operation_id = "listTeams",
    summary = "List teams, optionally filtered by year",
    params(TeamListQuery),
    responses(
        (status = 200, description = "List of teams", body = Vec<TeamResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<TeamListQuery>,
) -> Result<Json<Vec<TeamResponse>>, AppError> {
    let mut select = team::Entity::find();
    if let Some(year) = query.year {
        select = select.filter(team::Column::Year.eq(year));
    }

    let teams = select
        .order_by_asc(team::Column::Year)
        .order_by_asc(team::Column::Grade)
        .order_by_asc(team::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Teams",
    operation_id = "getTeam",
    summary = "Get a team by ID",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team details", body = TeamResponse),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TeamResponse>, AppError> {
    let model = find_team(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Teams",
    operation_id = "updateTeam",
    summary = "Update a team",
    params(("id" = i32, Path, description = "Team ID")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name already used that year (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, AppError> {
    validate_update_team(&payload)?;

    if payload == UpdateTeamRequest::default() {
        let existing = find_team(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_team(&txn, id).await?;

    let mut active: team::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(year) = payload.year {
        active.year = Set(year);
    }
    if let Some(ref grade) = payload.grade {
        active.grade = Set(grade.trim().to_string());
    }

    match active.update(&txn).await {
        Ok(model) => {
            txn.commit().await?;
            Ok(Json(model.into()))
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(name_taken())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Teams",
    operation_id = "deleteTeam",
    summary = "Delete a team",
    description = "Deletes a team that is not placed in any bracket and has no dance or point records. References from decided matches (`winner_id`, `walkover_team_id`) are nulled out; the matches themselves are kept.",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Team still referenced (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_team(&txn, id).await?;

    let seeded = bracket_match::Entity::find()
        .filter(
            Condition::any()
                .add(bracket_match::Column::TeamAId.eq(id))
                .add(bracket_match::Column::TeamBId.eq(id)),
        )
        .count(&txn)
        .await?;
    if seeded > 0 {
        return Err(AppError::Conflict(
            "Team is placed in a bracket; remove it from its matches first".into(),
        ));
    }

    let dances = dance_performance::Entity::find()
        .filter(dance_performance::Column::TeamId.eq(id))
        .count(&txn)
        .await?;
    let entries = point_entry::Entity::find()
        .filter(point_entry::Column::TeamId.eq(id))
        .count(&txn)
        .await?;
    if dances > 0 || entries > 0 {
        return Err(AppError::Conflict(
            "Team has dance or point records; delete those first".into(),
        ));
    }

    // Weak references survive as NULL; the matches stay.
    bracket_match::Entity::update_many()
        .filter(bracket_match::Column::WinnerId.eq(id))
        .col_expr(bracket_match::Column::WinnerId, Expr::value(Option::<i32>::None))
        .exec(&txn)
        .await?;
    bracket_match::Entity::update_many()
        .filter(bracket_match::Column::WalkoverTeamId.eq(id))
        .col_expr(
            bracket_match::Column::WalkoverTeamId,
            Expr::value(Option::<i32>::None),
        )
        .exec(&txn)
        .await?;

    let active: team::ActiveModel = existing.into();
    active.delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(team_id = id, "team deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn name_taken() -> AppError {
    AppError::UniqueViolation(FieldError::new(
        "name",
        "A team with this name already exists for that year",
    ))
}

async fn find_team<C: ConnectionTrait>(db: &C, id: i32) -> Result<team::Model, AppError> {
    team::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))
}
