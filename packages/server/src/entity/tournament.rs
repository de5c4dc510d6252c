use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tournament")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    /// School year the tournament belongs to, e.g. 2026. Teams are
    /// attached to the tournament through this year, not through a
    /// foreign key.
    pub year: i32,

    #[sea_orm(has_many)]
    pub matches: HasMany<super::bracket_match::Entity>,

    #[sea_orm(has_many)]
    pub dance_performances: HasMany<super::dance_performance::Entity>,

    #[sea_orm(has_many)]
    pub point_entries: HasMany<super::point_entry::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
