use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::stage::{BracketSlot, Stage};

/// One bracket contest between two teams at a fixed slot.
///
/// Unique on (tournament_id, modality_id, slot); the composite index
/// is created in `seed::ensure_indexes`. Team columns are weak
/// references without a database-level foreign key: the team delete
/// handler nulls `winner_id` and `walkover_team_id` itself.
///
/// `winner_id` is set if and only if the match is closed and a winner
/// was resolved; reopening clears it. Matches are never deleted
/// individually, only through the tournament cascade.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bracket_match")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub tournament_id: i32,
    #[sea_orm(belongs_to, from = "tournament_id", to = "id")]
    pub tournament: HasOne<super::tournament::Entity>,

    pub modality_id: i32,
    #[sea_orm(belongs_to, from = "modality_id", to = "id")]
    pub modality: HasOne<super::modality::Entity>,

    pub stage: Stage,
    pub slot: BracketSlot,

    pub date: Date,
    pub time: Option<Time>,

    /// Both sides are optional until filled by bracket propagation or
    /// manual entry.
    pub team_a_id: Option<i32>,
    pub team_b_id: Option<i32>,

    pub started: bool,

    /// Three-state: unset, no walkover, or walkover happened.
    pub walkover: Option<bool>,
    pub walkover_team_id: Option<i32>,

    pub score_a: Option<i32>,
    pub score_b: Option<i32>,

    /// Set-score pairs, only populated when the modality has sets.
    pub set1_a: Option<i32>,
    pub set1_b: Option<i32>,
    pub set2_a: Option<i32>,
    pub set2_b: Option<i32>,
    pub set3_a: Option<i32>,
    pub set3_b: Option<i32>,

    pub tied: Option<bool>,
    pub tiebreak_a: Option<i32>,
    pub tiebreak_b: Option<i32>,

    pub closed: bool,
    pub winner_id: Option<i32>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
