//! Shared model fixtures for unit tests.

use chrono::{NaiveDate, TimeZone, Utc};

use super::modality::{Category, Model as Modality};
use super::stage::{BracketSlot, Stage};
use super::{bracket_match, dance_performance, point_entry, team};

pub fn scored_modality(has_sets: bool) -> Modality {
    Modality {
        id: 1,
        name: "Futsal".into(),
        category: Category::Mixed,
        has_score: true,
        has_sets,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn unscored_modality() -> Modality {
    Modality {
        id: 2,
        name: "Chess".into(),
        category: Category::Mixed,
        has_score: false,
        has_sets: false,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// An open, not-started quarterfinal at the first slot.
pub fn match_between(team_a: Option<i32>, team_b: Option<i32>) -> bracket_match::Model {
    bracket_match::Model {
        id: 1,
        tournament_id: 1,
        modality_id: 1,
        stage: Stage::QuarterFinal,
        slot: BracketSlot::First,
        date: NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
        time: None,
        team_a_id: team_a,
        team_b_id: team_b,
        started: false,
        walkover: None,
        walkover_team_id: None,
        score_a: None,
        score_b: None,
        set1_a: None,
        set1_b: None,
        set2_a: None,
        set2_b: None,
        set3_a: None,
        set3_b: None,
        tied: None,
        tiebreak_a: None,
        tiebreak_b: None,
        closed: false,
        winner_id: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn team_named(id: i32, name: &str) -> team::Model {
    team::Model {
        id,
        name: name.into(),
        year: 2026,
        grade: "1st grade".into(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn dance(team_id: i32, placement: i32) -> dance_performance::Model {
    dance_performance::Model {
        id: 1,
        tournament_id: 1,
        team_id,
        date: NaiveDate::from_ymd_opt(2026, 6, 13).unwrap(),
        time: chrono::NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        placement,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn entry(team_id: i32, kind: point_entry::OccurrenceKind, points: i32) -> point_entry::Model {
    point_entry::Model {
        id: 1,
        tournament_id: 1,
        team_id,
        kind,
        points,
        note: String::new(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}
