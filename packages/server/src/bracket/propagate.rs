use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
    Set,
};

use crate::entity::bracket_match;
use crate::entity::stage::BracketSlot;

use super::topology::{self, Side};

/// One pending write to a downstream match: put `team_id` (or clear
/// the column, on reopen) on the given side of the match at `slot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DownstreamWrite {
    pub slot: BracketSlot,
    pub side: Side,
    pub team_id: Option<i32>,
}

/// Plan the downstream writes for a match that was just closed
/// (winner present) or reopened (winner `None`).
///
/// Pure. Terminal slots plan nothing. A single-branch slot yields one
/// write; a semifinal yields two (winner leg and loser leg). With no
/// winner, every leg is planned as a clear so reopening removes the
/// match's previous contribution. Planning the same input twice gives
/// the same writes, which keeps the whole propagation idempotent.
pub fn plan(m: &bracket_match::Model, winner: Option<i32>) -> Vec<DownstreamWrite> {
    let Some(route) = topology::route_for(m.stage, m.slot) else {
        return Vec::new();
    };

    let mut writes = Vec::with_capacity(2);
    writes.push(DownstreamWrite {
        slot: route.winner_to.slot,
        side: route.winner_to.side,
        team_id: winner,
    });

    if let Some(loser_to) = route.loser_to {
        let loser = winner.and_then(|w| match (m.team_a_id, m.team_b_id) {
            (Some(a), Some(b)) if w == a => Some(b),
            (Some(a), Some(b)) if w == b => Some(a),
            _ => None,
        });
        writes.push(DownstreamWrite {
            slot: loser_to.slot,
            side: loser_to.side,
            team_id: loser,
        });
    }

    writes
}

/// Apply planned writes to the downstream matches of one bracket.
///
/// Runs on the caller's transaction; the downstream row is locked so
/// two semifinals closing concurrently cannot lose each other's write
/// to the final. A missing downstream match is not an error: staff
/// may simply not have created it yet.
pub async fn apply<C: ConnectionTrait>(
    db: &C,
    tournament_id: i32,
    modality_id: i32,
    writes: &[DownstreamWrite],
) -> Result<(), DbErr> {
    for write in writes {
        let Some(downstream) = bracket_match::Entity::find()
            .filter(bracket_match::Column::TournamentId.eq(tournament_id))
            .filter(bracket_match::Column::ModalityId.eq(modality_id))
            .filter(bracket_match::Column::Slot.eq(write.slot))
            .lock(LockType::Update)
            .one(db)
            .await?
        else {
            tracing::debug!(tournament_id, modality_id, %write.slot, "no downstream match to update");
            continue;
        };

        let mut active: bracket_match::ActiveModel = downstream.into();
        match write.side {
            Side::TeamA => active.team_a_id = Set(write.team_id),
            Side::TeamB => active.team_b_id = Set(write.team_id),
        }
        active.updated_at = Set(chrono::Utc::now());
        active.update(db).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::stage::Stage;
    use crate::entity::test_support::match_between;

    #[test]
    fn quarterfinal_routes_winner_only() {
        let mut m = match_between(Some(10), Some(20));
        m.stage = Stage::QuarterFinal;
        m.slot = BracketSlot::First;

        let writes = plan(&m, Some(10));
        assert_eq!(
            writes,
            vec![DownstreamWrite {
                slot: BracketSlot::Fifth,
                side: Side::TeamA,
                team_id: Some(10),
            }]
        );
    }

    #[test]
    fn semifinal_routes_winner_and_loser() {
        let mut m = match_between(Some(10), Some(20));
        m.stage = Stage::SemiFinal;
        m.slot = BracketSlot::Sixth;

        let writes = plan(&m, Some(20));
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[0],
            DownstreamWrite {
                slot: BracketSlot::Eighth,
                side: Side::TeamB,
                team_id: Some(20),
            }
        );
        assert_eq!(
            writes[1],
            DownstreamWrite {
                slot: BracketSlot::Seventh,
                side: Side::TeamB,
                team_id: Some(10),
            }
        );
    }

    #[test]
    fn reopening_clears_both_legs() {
        let mut m = match_between(Some(10), Some(20));
        m.stage = Stage::SemiFinal;
        m.slot = BracketSlot::Ninth;

        let writes = plan(&m, None);
        assert_eq!(writes.len(), 2);
        assert!(writes.iter().all(|w| w.team_id.is_none()));
        assert_eq!(writes[0].slot, BracketSlot::Twelfth);
        assert_eq!(writes[1].slot, BracketSlot::Eleventh);
    }

    #[test]
    fn terminal_slots_plan_nothing() {
        let mut m = match_between(Some(10), Some(20));
        m.stage = Stage::Final;
        m.slot = BracketSlot::Eighth;
        assert!(plan(&m, Some(10)).is_empty());

        m.stage = Stage::ThirdPlace;
        m.slot = BracketSlot::Seventh;
        assert!(plan(&m, Some(10)).is_empty());
    }

    #[test]
    fn planning_is_idempotent() {
        let mut m = match_between(Some(10), Some(20));
        m.stage = Stage::QuarterFinal;
        m.slot = BracketSlot::Third;
        assert_eq!(plan(&m, Some(20)), plan(&m, Some(20)));
    }
}
