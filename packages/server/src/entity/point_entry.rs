use sea_orm::entity::prelude::*;
use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of occurrence a point entry records.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, DeriveActiveEnum, EnumIter,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "PascalCase")]
pub enum OccurrenceKind {
    #[sea_orm(string_value = "Donation")]
    Donation,
    #[sea_orm(string_value = "Penalty")]
    Penalty,
}

impl OccurrenceKind {
    /// Sign convention: donations are stored positive, penalties are
    /// stored negative, so the ranking aggregation is a plain sum.
    /// Enforced when entries are created or edited.
    pub fn sign_ok(&self, points: i32) -> bool {
        match self {
            Self::Donation => points > 0,
            Self::Penalty => points < 0,
        }
    }
}

impl fmt::Display for OccurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Donation => "Donation",
            Self::Penalty => "Penalty",
        })
    }
}

/// A bonus or penalty applied directly to a team's ranking total.
/// `created_at` is set once at creation and never updated.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "point_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub tournament_id: i32,
    #[sea_orm(belongs_to, from = "tournament_id", to = "id")]
    pub tournament: HasOne<super::tournament::Entity>,

    pub team_id: i32,

    pub kind: OccurrenceKind,
    /// Signed point delta; see `OccurrenceKind::sign_ok`.
    pub points: i32,
    pub note: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
