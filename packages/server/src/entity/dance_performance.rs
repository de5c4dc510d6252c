use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A team's dance presentation and its jury placement.
///
/// Placement 0 means disqualified; 1..=12 are ranks. Only placements
/// 1-4 score points in the general ranking.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dance_performance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub tournament_id: i32,
    #[sea_orm(belongs_to, from = "tournament_id", to = "id")]
    pub tournament: HasOne<super::tournament::Entity>,

    pub team_id: i32,

    pub date: Date,
    pub time: Time,

    pub placement: i32,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
