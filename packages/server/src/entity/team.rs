use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A class team. Unique on (name, year); the composite index is
/// created in `seed::ensure_indexes`. Matches and point entries hold
/// weak references to teams: deleting a team never deletes a match.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    /// School year, e.g. 2026.
    pub year: i32,
    /// Grade/series label, e.g. "1st grade".
    pub grade: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
