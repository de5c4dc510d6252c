use sea_orm::entity::prelude::*;
use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Competition category of a modality.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, DeriveActiveEnum, EnumIter,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "PascalCase")]
pub enum Category {
    #[sea_orm(string_value = "Male")]
    Male,
    #[sea_orm(string_value = "Female")]
    Female,
    #[sea_orm(string_value = "Mixed")]
    Mixed,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Mixed => "Mixed",
        })
    }
}

/// A sport or event type. `has_score`/`has_sets` drive which match
/// fields are legal; once any match references the modality this
/// configuration is frozen (the update handler refuses to flip the
/// flags).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "modality")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub category: Category,

    /// Whether matches carry a numeric score. When false, closing a
    /// match requires an explicitly chosen winner.
    pub has_score: bool,
    /// Whether matches additionally record up to three set-score
    /// pairs. Only meaningful when `has_score` is true.
    pub has_sets: bool,

    #[sea_orm(has_many)]
    pub matches: HasMany<super::bracket_match::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
