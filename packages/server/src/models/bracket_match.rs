use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::double_option;
use crate::entity::stage::{BracketSlot, Stage};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateMatchRequest {
    pub modality_id: i32,
    pub stage: Stage,
    pub slot: BracketSlot,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    /// Teams may be left open for slots filled by propagation.
    pub team_a_id: Option<i32>,
    pub team_b_id: Option<i32>,
}

/// PATCH payload for an open match. `closed` and `winner_id` are
/// deliberately absent: closing and reopening are their own
/// operations so the bracket side effects stay explicit.
#[derive(Debug, Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateMatchRequest {
    pub stage: Option<Stage>,
    pub slot: Option<BracketSlot>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub time: Option<Option<NaiveTime>>,
    #[serde(default, deserialize_with = "double_option")]
    pub team_a_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub team_b_id: Option<Option<i32>>,
    pub started: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub walkover: Option<Option<bool>>,
    #[serde(default, deserialize_with = "double_option")]
    pub walkover_team_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub score_a: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub score_b: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub set1_a: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub set1_b: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub set2_a: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub set2_b: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub set3_a: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub set3_b: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tied: Option<Option<bool>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tiebreak_a: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tiebreak_b: Option<Option<i32>>,
}

/// Body of the close operation. The explicit winner is only accepted
/// (and then required) for modalities without a score; scored
/// modalities derive the winner from the fields.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct CloseMatchRequest {
    pub winner_id: Option<i32>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct MatchListQuery {
    pub modality_id: Option<i32>,
    pub stage: Option<Stage>,
    pub closed: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MatchResponse {
    pub id: i32,
    pub tournament_id: i32,
    pub modality_id: i32,
    pub stage: Stage,
    pub slot: BracketSlot,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub team_a_id: Option<i32>,
    pub team_b_id: Option<i32>,
    pub started: bool,
    pub walkover: Option<bool>,
    pub walkover_team_id: Option<i32>,
    pub score_a: Option<i32>,
    pub score_b: Option<i32>,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::bracket_match::Model> for MatchResponse {
    fn from(m: crate::entity::bracket_match::Model) -> Self {
        Self {
            id: m.id,
            tournament_id: m.tournament_id,
            modality_id: m.modality_id,
            stage: m.stage,
            slot: m.slot,
            date: m.date,
            time: m.time,
            team_a_id: m.team_a_id,
            team_b_id: m.team_b_id,
            started: m.started,
            walkover: m.walkover,
            walkover_team_id: m.walkover_team_id,
            score_a: m.score_a,
            score_b: m.score_b,
            set1_a: m.set1_a,
            set1_b: m.set1_b,
            set2_a: m.set2_a,
            set2_b: m.set2_b,
            set3_a: m.set3_a,
            set3_b: m.set3_b,
            tied: m.tied,
            tiebreak_a: m.tiebreak_a,
            tiebreak_b: m.tiebreak_b,
            closed: m.closed,
            winner_id: m.winner_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl UpdateMatchRequest {
    /// Overlay this patch onto an existing match, producing the
    /// candidate state the rule checks run against.
    pub fn merged_into(
        &self,
        existing: &crate::entity::bracket_match::Model,
    ) -> crate::entity::bracket_match::Model {
        let mut m = existing.clone();
        if let Some(stage) = self.stage {
            m.stage = stage;
        }
        if let Some(slot) = self.slot {
            m.slot = slot;
        }
        if let Some(date) = self.date {
            m.date = date;
        }
        if let Some(time) = self.time {
            m.time = time;
        }
        if let Some(team_a_id) = self.team_a_id {
            m.team_a_id = team_a_id;
        }
        if let Some(team_b_id) = self.team_b_id {
            m.team_b_id = team_b_id;
        }
        if let Some(started) = self.started {
            m.started = started;
        }
        if let Some(walkover) = self.walkover {
            m.walkover = walkover;
        }
        if let Some(walkover_team_id) = self.walkover_team_id {
            m.walkover_team_id = walkover_team_id;
        }
        if let Some(score_a) = self.score_a {
            m.score_a = score_a;
        }
        if let Some(score_b) = self.score_b {
            m.score_b = score_b;
        }
        if let Some(set1_a) = self.set1_a {
            m.set1_a = set1_a;
        }
        if let Some(set1_b) = self.set1_b {
            m.set1_b = set1_b;
        }
        if let Some(set2_a) = self.set2_a {
            m.set2_a = set2_a;
        }
        if let Some(set2_b) = self.set2_b {
            m.set2_b = set2_b;
        }
        if let Some(set3_a) = self.set3_a {
            m.set3_a = set3_a;
        }
        if let Some(set3_b) = self.set3_b {
            m.set3_b = set3_b;
        }
        if let Some(tied) = self.tied {
            m.tied = tied;
        }
        if let Some(tiebreak_a) = self.tiebreak_a {
            m.tiebreak_a = tiebreak_a;
        }
        if let Some(tiebreak_b) = self.tiebreak_b {
            m.tiebreak_b = tiebreak_b;
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_support::match_between;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let existing = {
            let mut m = match_between(Some(1), Some(2));
            m.score_a = Some(3);
            m.time = NaiveTime::from_hms_opt(14, 0, 0);
            m
        };

        // `score_a: null` clears; `time` absent stays untouched.
        let patch: UpdateMatchRequest =
            serde_json::from_str(r#"{"score_a": null, "score_b": 1}"#).unwrap();
        let merged = patch.merged_into(&existing);
        assert_eq!(merged.score_a, None);
        assert_eq!(merged.score_b, Some(1));
        assert_eq!(merged.time, NaiveTime::from_hms_opt(14, 0, 0));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let existing = match_between(Some(1), Some(2));
        let patch: UpdateMatchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.merged_into(&existing), existing);
        assert_eq!(patch, UpdateMatchRequest::default());
    }
}
