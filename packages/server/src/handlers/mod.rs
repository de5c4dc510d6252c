pub mod bracket_match;
pub mod dance;
pub mod modality;
pub mod point_entry;
pub mod standings;
pub mod team;
pub mod tournament;

use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entity::tournament as tournament_entity;
use crate::error::AppError;

/// Shared across the nested resources: every `/tournaments/{id}/...`
/// handler resolves its tournament first.
pub(crate) async fn find_tournament<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<tournament_entity::Model, AppError> {
    tournament_entity::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tournament not found".into()))
}
