use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{bracket_match, modality};
use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::models::modality::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Modalities",
    operation_id = "createModality",
    summary = "Create a modality",
    request_body = CreateModalityRequest,
    responses(
        (status = 201, description = "Modality created", body = ModalityResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_modality(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateModalityRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_modality(&payload)?;

    let new_modality = modality::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        category: Set(payload.category),
        has_score: Set(payload.has_score),
        has_sets: Set(payload.has_sets),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_modality.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(ModalityResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Modalities",
    operation_id = "listModalities",
    summary = "List modalities",
    responses(
        (status = 200, description = "List of modalities", body = Vec<ModalityResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_modalities(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModalityResponse>>, AppError> {
    let modalities = modality::Entity::find()
        .order_by_asc(modality::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(
        modalities.into_iter().map(ModalityResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Modalities",
    operation_id = "getModality",
    summary = "Get a modality by ID",
    params(("id" = i32, Path, description = "Modality ID")),
    responses(
        (status = 200, description = "Modality details", body = ModalityResponse),
        (status = 404, description = "Modality not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_modality(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ModalityResponse>, AppError> {
    let model = find_modality(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Modalities",
    operation_id = "updateModality",
    summary = "Update a modality",
    description = "Renames or recategorizes a modality. `has_score`/`has_sets` are frozen once any match references the modality: match rules were validated against them.",
    params(("id" = i32, Path, description = "Modality ID")),
    request_body = UpdateModalityRequest,
    responses(
        (status = 200, description = "Modality updated", body = ModalityResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Modality not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Configuration frozen (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_modality(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateModalityRequest>,
) -> Result<Json<ModalityResponse>, AppError> {
    validate_update_modality(&payload)?;

    if payload == UpdateModalityRequest::default() {
        let existing = find_modality(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_modality(&txn, id).await?;

    let effective_score = payload.has_score.unwrap_or(existing.has_score);
    let effective_sets = payload.has_sets.unwrap_or(existing.has_sets);
    validate_flags(effective_score, effective_sets)?;

    let flags_change =
        effective_score != existing.has_score || effective_sets != existing.has_sets;
    if flags_change {
        let referenced = bracket_match::Entity::find()
            .filter(bracket_match::Column::ModalityId.eq(id))
            .count(&txn)
            .await?;
        if referenced > 0 {
            return Err(AppError::Conflict(
                "Modality configuration is frozen: matches already reference it".into(),
            ));
        }
    }

    let mut active: modality::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(has_score) = payload.has_score {
        active.has_score = Set(has_score);
    }
    if let Some(has_sets) = payload.has_sets {
        active.has_sets = Set(has_sets);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Modalities",
    operation_id = "deleteModality",
    summary = "Delete a modality",
    description = "Deletes a modality that has no matches.",
    params(("id" = i32, Path, description = "Modality ID")),
    responses(
        (status = 204, description = "Modality deleted"),
        (status = 404, description = "Modality not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Matches still reference it (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_modality(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_modality(&txn, id).await?;

    let referenced = bracket_match::Entity::find()
        .filter(bracket_match::Column::ModalityId.eq(id))
        .count(&txn)
        .await?;
    if referenced > 0 {
        return Err(AppError::Conflict(
            "Modality has matches; delete the tournament instead".into(),
        ));
    }

    let active: modality::ActiveModel = existing.into();
    active.delete(&txn).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_modality<C: ConnectionTrait>(db: &C, id: i32) -> Result<modality::Model, AppError> {
    modality::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Modality not found".into()))
}
