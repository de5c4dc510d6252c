use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use tracing::info;

use crate::entity::{bracket_match, team};

/// Ensure the composite unique indexes exist.
///
/// SeaORM's schema-sync doesn't create composite unique indexes, so
/// they are created manually on startup. The slot-occupancy and
/// team-naming rules depend on them, so failure here aborts startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // One match per (tournament, modality, slot): the second write to
    // an occupied slot must be rejected, not merged.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_match_tournament_modality_slot")
        .table(bracket_match::Entity)
        .col(bracket_match::Column::TournamentId)
        .col(bracket_match::Column::ModalityId)
        .col(bracket_match::Column::Slot)
        .to_string(PostgresQueryBuilder);
    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_match_tournament_modality_slot exists");

    // Team names are unique within a school year.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_team_name_year")
        .table(team::Entity)
        .col(team::Column::Name)
        .col(team::Column::Year)
        .to_string(PostgresQueryBuilder);
    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_team_name_year exists");

    Ok(())
}
