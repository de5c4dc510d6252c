//! Ranking aggregation.
//!
//! Two independent strategies over already-persisted data:
//!
//! * the general ranking, combining placement points from the final
//!   and third-place matches, dance placements 1-4, and bonus/penalty
//!   entries;
//! * a per-modality view that sums each team's match scores plus a
//!   win bonus instead of placement points.
//!
//! The folds are pure over pre-fetched rows; the async wrappers just
//! run the queries and hand the rows over.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::entity::stage::Stage;
use crate::entity::{bracket_match, dance_performance, point_entry, team, tournament};

/// Points awarded per final placement: 1st through 4th.
pub const PLACEMENT_POINTS: [i64; 4] = [1000, 800, 600, 400];

/// Points for a placement rank, or `None` outside 1..=4.
pub fn placement_points(placement: i32) -> Option<i64> {
    match placement {
        1..=4 => Some(PLACEMENT_POINTS[(placement - 1) as usize]),
        _ => None,
    }
}

/// One row of a standings list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamPoints {
    pub team_id: i32,
    pub team: String,
    pub points: i64,
}

/// General ranking for a tournament.
///
/// Every team of the tournament's year appears, including teams with
/// zero points. Ordered by points descending, ties broken by team
/// name ascending. Matches contribute only when closed with a
/// resolved winner and in a placement stage; references to teams
/// outside the tournament's year are ignored.
pub fn compute_standings(
    teams: &[team::Model],
    matches: &[bracket_match::Model],
    dances: &[dance_performance::Model],
    entries: &[point_entry::Model],
) -> Vec<TeamPoints> {
    let mut totals: HashMap<i32, i64> = teams.iter().map(|t| (t.id, 0)).collect();

    for m in matches {
        if !m.closed || !m.stage.awards_placement() {
            continue;
        }
        let Some(winner) = m.winner_id else { continue };
        let loser = match (m.team_a_id, m.team_b_id) {
            (Some(a), Some(b)) if winner == a => Some(b),
            (Some(a), Some(b)) if winner == b => Some(a),
            _ => None,
        };
        let (winner_rank, loser_rank) = match m.stage {
            Stage::Final => (1, 2),
            Stage::ThirdPlace => (3, 4),
            _ => unreachable!("awards_placement covers exactly these stages"),
        };
        if let Some(points) = totals.get_mut(&winner) {
            *points += placement_points(winner_rank).unwrap_or(0);
        }
        if let Some(loser) = loser
            && let Some(points) = totals.get_mut(&loser)
        {
            *points += placement_points(loser_rank).unwrap_or(0);
        }
    }

    for dance in dances {
        if let Some(awarded) = placement_points(dance.placement)
            && let Some(points) = totals.get_mut(&dance.team_id)
        {
            *points += awarded;
        }
    }

    // Donations are stored positive and penalties negative (validated
    // at entry creation), so both are a plain addition here.
    for entry in entries {
        if let Some(points) = totals.get_mut(&entry.team_id) {
            *points += i64::from(entry.points);
        }
    }

    into_sorted_rows(totals, teams)
}

/// Per-modality standings: each team's summed match score plus one
/// bonus point per win, over closed non-walkover matches. Walkover
/// matches carry no score and contribute nothing. Only teams that
/// actually appear in a counted match are listed.
pub fn compute_modality_standings(
    teams: &[team::Model],
    matches: &[bracket_match::Model],
) -> Vec<TeamPoints> {
    let mut totals: HashMap<i32, i64> = HashMap::new();

    for m in matches {
        if !m.closed || m.walkover == Some(true) {
            continue;
        }
        if let (Some(team), Some(score)) = (m.team_a_id, m.score_a) {
            let bonus = i64::from(m.winner_id == Some(team));
            *totals.entry(team).or_default() += i64::from(score) + bonus;
        }
        if let (Some(team), Some(score)) = (m.team_b_id, m.score_b) {
            let bonus = i64::from(m.winner_id == Some(team));
            *totals.entry(team).or_default() += i64::from(score) + bonus;
        }
    }

    into_sorted_rows(totals, teams)
}

fn into_sorted_rows(totals: HashMap<i32, i64>, teams: &[team::Model]) -> Vec<TeamPoints> {
    let names: HashMap<i32, &str> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();
    let mut rows: Vec<TeamPoints> = totals
        .into_iter()
        .filter_map(|(team_id, points)| {
            names.get(&team_id).map(|name| TeamPoints {
                team_id,
                team: (*name).to_string(),
                points,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.team.cmp(&b.team)));
    rows
}

/// Fetch everything the general ranking needs and fold it.
pub async fn placement_standings<C: ConnectionTrait>(
    db: &C,
    tournament: &tournament::Model,
) -> Result<Vec<TeamPoints>, DbErr> {
    let teams = team::Entity::find()
        .filter(team::Column::Year.eq(tournament.year))
        .all(db)
        .await?;
    let matches = bracket_match::Entity::find()
        .filter(bracket_match::Column::TournamentId.eq(tournament.id))
        .filter(bracket_match::Column::Closed.eq(true))
        .filter(bracket_match::Column::Stage.is_in([Stage::ThirdPlace, Stage::Final]))
        .all(db)
        .await?;
    let dances = dance_performance::Entity::find()
        .filter(dance_performance::Column::TournamentId.eq(tournament.id))
        .filter(dance_performance::Column::Placement.between(1, 4))
        .all(db)
        .await?;
    let entries = point_entry::Entity::find()
        .filter(point_entry::Column::TournamentId.eq(tournament.id))
        .all(db)
        .await?;

    Ok(compute_standings(&teams, &matches, &dances, &entries))
}

/// Fetch and fold the per-modality view.
pub async fn modality_standings<C: ConnectionTrait>(
    db: &C,
    tournament: &tournament::Model,
    modality_id: i32,
) -> Result<Vec<TeamPoints>, DbErr> {
    let teams = team::Entity::find()
        .filter(team::Column::Year.eq(tournament.year))
        .all(db)
        .await?;
    let matches = bracket_match::Entity::find()
        .filter(bracket_match::Column::TournamentId.eq(tournament.id))
        .filter(bracket_match::Column::ModalityId.eq(modality_id))
        .filter(bracket_match::Column::Closed.eq(true))
        .all(db)
        .await?;

    Ok(compute_modality_standings(&teams, &matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::point_entry::OccurrenceKind;
    use crate::entity::stage::BracketSlot;
    use crate::entity::test_support::{dance, entry, match_between, team_named};

    fn closed_medal_match(
        stage: Stage,
        slot: BracketSlot,
        team_a: i32,
        team_b: i32,
        winner: i32,
    ) -> bracket_match::Model {
        let mut m = match_between(Some(team_a), Some(team_b));
        m.stage = stage;
        m.slot = slot;
        m.started = true;
        m.closed = true;
        m.score_a = Some(if winner == team_a { 2 } else { 0 });
        m.score_b = Some(if winner == team_b { 2 } else { 0 });
        m.winner_id = Some(winner);
        m
    }

    #[test]
    fn placement_table_matches_ranks() {
        assert_eq!(placement_points(1), Some(1000));
        assert_eq!(placement_points(2), Some(800));
        assert_eq!(placement_points(3), Some(600));
        assert_eq!(placement_points(4), Some(400));
        assert_eq!(placement_points(0), None);
        assert_eq!(placement_points(5), None);
    }

    #[test]
    fn final_and_third_place_award_the_four_placements() {
        let teams = vec![
            team_named(1, "Blue"),
            team_named(2, "Red"),
            team_named(3, "Green"),
            team_named(4, "Yellow"),
        ];
        let matches = vec![
            closed_medal_match(Stage::Final, BracketSlot::Eighth, 1, 2, 1),
            closed_medal_match(Stage::ThirdPlace, BracketSlot::Seventh, 3, 4, 4),
        ];
        let rows = compute_standings(&teams, &matches, &[], &[]);
        assert_eq!(rows[0].team_id, 1);
        assert_eq!(rows[0].points, 1000);
        assert_eq!(rows[1].team_id, 2);
        assert_eq!(rows[1].points, 800);
        assert_eq!(rows[2].team_id, 4);
        assert_eq!(rows[2].points, 600);
        assert_eq!(rows[3].team_id, 3);
        assert_eq!(rows[3].points, 400);
    }

    #[test]
    fn matches_without_resolved_winner_are_skipped() {
        let teams = vec![team_named(1, "Blue"), team_named(2, "Red")];
        let mut m = closed_medal_match(Stage::Final, BracketSlot::Eighth, 1, 2, 1);
        m.winner_id = None;
        let rows = compute_standings(&teams, &[m], &[], &[]);
        assert!(rows.iter().all(|r| r.points == 0));
    }

    #[test]
    fn dance_placements_use_the_same_table() {
        let teams = vec![team_named(1, "Blue"), team_named(2, "Red")];
        let dances = vec![dance(1, 2), dance(2, 4)];
        let rows = compute_standings(&teams, &[], &dances, &[]);
        assert_eq!(rows[0].points, 800);
        assert_eq!(rows[1].points, 400);
    }

    #[test]
    fn disqualified_and_low_dance_placements_score_nothing() {
        let teams = vec![team_named(1, "Blue")];
        let dances = vec![dance(1, 0), dance(1, 5), dance(1, 12)];
        let rows = compute_standings(&teams, &[], &dances, &[]);
        assert_eq!(rows[0].points, 0);
    }

    #[test]
    fn donation_and_penalty_net_out_as_a_plain_sum() {
        // A donation of 50 and a penalty of 30 (stored as -30).
        let teams = vec![team_named(1, "Blue")];
        let entries = vec![
            entry(1, OccurrenceKind::Donation, 50),
            entry(1, OccurrenceKind::Penalty, -30),
        ];
        let rows = compute_standings(&teams, &[], &[], &entries);
        assert_eq!(rows[0].points, 20);
    }

    #[test]
    fn ordering_is_points_desc_then_name_asc_and_includes_zero_teams() {
        let teams = vec![
            team_named(1, "Alpha"),
            team_named(2, "Bravo"),
            team_named(3, "Brave"),
            team_named(4, "Zulu"),
        ];
        let entries = vec![
            entry(1, OccurrenceKind::Donation, 1000),
            entry(2, OccurrenceKind::Donation, 800),
            entry(3, OccurrenceKind::Donation, 800),
        ];
        let rows = compute_standings(&teams, &[], &[], &entries);
        let names: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(names, ["Alpha", "Bravo", "Brave", "Zulu"]);
        assert_eq!(rows[3].points, 0);
    }

    #[test]
    fn entries_for_unknown_teams_are_ignored() {
        let teams = vec![team_named(1, "Blue")];
        let entries = vec![entry(42, OccurrenceKind::Donation, 500)];
        let rows = compute_standings(&teams, &[], &[], &entries);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].points, 0);
    }

    #[test]
    fn modality_view_sums_scores_with_win_bonus() {
        let teams = vec![team_named(1, "Blue"), team_named(2, "Red")];
        let mut first = match_between(Some(1), Some(2));
        first.started = true;
        first.closed = true;
        first.score_a = Some(3);
        first.score_b = Some(1);
        first.winner_id = Some(1);

        let mut second = match_between(Some(2), Some(1));
        second.slot = BracketSlot::Second;
        second.started = true;
        second.closed = true;
        second.score_a = Some(2);
        second.score_b = Some(0);
        second.winner_id = Some(2);

        let rows = compute_modality_standings(&teams, &[first, second]);
        // Blue: 3 + 1 (win) + 0; Red: 1 + 2 + 1 (win). Tied totals
        // fall back to name order.
        assert_eq!(rows[0].team, "Blue");
        assert_eq!(rows[0].points, 4);
        assert_eq!(rows[1].team, "Red");
        assert_eq!(rows[1].points, 4);
    }

    #[test]
    fn modality_view_skips_walkovers_and_open_matches() {
        let teams = vec![team_named(1, "Blue"), team_named(2, "Red")];
        let mut walkover = match_between(Some(1), Some(2));
        walkover.started = true;
        walkover.closed = true;
        walkover.walkover = Some(true);
        walkover.walkover_team_id = Some(2);
        walkover.winner_id = Some(1);

        let mut open = match_between(Some(1), Some(2));
        open.slot = BracketSlot::Second;
        open.score_a = Some(5);
        open.score_b = Some(5);

        let rows = compute_modality_standings(&teams, &[walkover, open]);
        assert!(rows.is_empty());
    }
}
