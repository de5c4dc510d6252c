use crate::entity::stage::{BracketSlot, Stage};

/// Which side of the downstream match a propagated team lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    TeamA,
    TeamB,
}

/// Destination of one propagated team.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchTarget {
    pub slot: BracketSlot,
    pub side: Side,
}

/// Routing entry for one bracket position. Quarterfinals route their
/// winner only; semifinals route the winner to the final and the
/// loser to the third-place match. Final and third-place slots have
/// no entry at all: they are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotRoute {
    pub stage: Stage,
    pub slot: BracketSlot,
    pub winner_to: BranchTarget,
    pub loser_to: Option<BranchTarget>,
}

/// The fixed single-elimination routing table, covering both bracket
/// layouts over the shared slot namespace. Plain data: supporting
/// another layout means adding rows, not touching the engine.
pub const ROUTES: &[SlotRoute] = &[
    // Eight-team bracket: quarterfinals (slots 1-4) feed the
    // semifinals (slots 5-6).
    SlotRoute {
        stage: Stage::QuarterFinal,
        slot: BracketSlot::First,
        winner_to: BranchTarget {
            slot: BracketSlot::Fifth,
            side: Side::TeamA,
        },
        loser_to: None,
    },
    SlotRoute {
        stage: Stage::QuarterFinal,
        slot: BracketSlot::Second,
        winner_to: BranchTarget {
            slot: BracketSlot::Fifth,
            side: Side::TeamB,
        },
        loser_to: None,
    },
    SlotRoute {
        stage: Stage::QuarterFinal,
        slot: BracketSlot::Third,
        winner_to: BranchTarget {
            slot: BracketSlot::Sixth,
            side: Side::TeamA,
        },
        loser_to: None,
    },
    SlotRoute {
        stage: Stage::QuarterFinal,
        slot: BracketSlot::Fourth,
        winner_to: BranchTarget {
            slot: BracketSlot::Sixth,
            side: Side::TeamB,
        },
        loser_to: None,
    },
    // Semifinals (slots 5-6) feed the final (slot 8) and the
    // third-place match (slot 7).
    SlotRoute {
        stage: Stage::SemiFinal,
        slot: BracketSlot::Fifth,
        winner_to: BranchTarget {
            slot: BracketSlot::Eighth,
            side: Side::TeamA,
        },
        loser_to: Some(BranchTarget {
            slot: BracketSlot::Seventh,
            side: Side::TeamA,
        }),
    },
    SlotRoute {
        stage: Stage::SemiFinal,
        slot: BracketSlot::Sixth,
        winner_to: BranchTarget {
            slot: BracketSlot::Eighth,
            side: Side::TeamB,
        },
        loser_to: Some(BranchTarget {
            slot: BracketSlot::Seventh,
            side: Side::TeamB,
        }),
    },
    // Four-team bracket: semifinals (slots 9-10) feed the final
    // (slot 12) and the third-place match (slot 11).
    SlotRoute {
        stage: Stage::SemiFinal,
        slot: BracketSlot::Ninth,
        winner_to: BranchTarget {
            slot: BracketSlot::Twelfth,
            side: Side::TeamA,
        },
        loser_to: Some(BranchTarget {
            slot: BracketSlot::Eleventh,
            side: Side::TeamA,
        }),
    },
    SlotRoute {
        stage: Stage::SemiFinal,
        slot: BracketSlot::Tenth,
        winner_to: BranchTarget {
            slot: BracketSlot::Twelfth,
            side: Side::TeamB,
        },
        loser_to: Some(BranchTarget {
            slot: BracketSlot::Eleventh,
            side: Side::TeamB,
        }),
    },
];

/// Routing entry for a match position, or `None` for terminal slots
/// (final, third place) and positions outside the table.
pub fn route_for(stage: Stage, slot: BracketSlot) -> Option<&'static SlotRoute> {
    ROUTES.iter().find(|r| r.stage == stage && r.slot == slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_slots_route_nowhere() {
        assert!(route_for(Stage::Final, BracketSlot::Eighth).is_none());
        assert!(route_for(Stage::ThirdPlace, BracketSlot::Seventh).is_none());
        assert!(route_for(Stage::Final, BracketSlot::Twelfth).is_none());
        assert!(route_for(Stage::ThirdPlace, BracketSlot::Eleventh).is_none());
    }

    #[test]
    fn quarterfinals_feed_semifinal_sides() {
        let r = route_for(Stage::QuarterFinal, BracketSlot::First).unwrap();
        assert_eq!(r.winner_to.slot, BracketSlot::Fifth);
        assert_eq!(r.winner_to.side, Side::TeamA);
        assert!(r.loser_to.is_none());

        let r = route_for(Stage::QuarterFinal, BracketSlot::Fourth).unwrap();
        assert_eq!(r.winner_to.slot, BracketSlot::Sixth);
        assert_eq!(r.winner_to.side, Side::TeamB);
    }

    #[test]
    fn semifinals_feed_final_and_third_place() {
        for (slot, final_slot, third_slot) in [
            (BracketSlot::Fifth, BracketSlot::Eighth, BracketSlot::Seventh),
            (BracketSlot::Sixth, BracketSlot::Eighth, BracketSlot::Seventh),
            (
                BracketSlot::Ninth,
                BracketSlot::Twelfth,
                BracketSlot::Eleventh,
            ),
            (
                BracketSlot::Tenth,
                BracketSlot::Twelfth,
                BracketSlot::Eleventh,
            ),
        ] {
            let r = route_for(Stage::SemiFinal, slot).unwrap();
            assert_eq!(r.winner_to.slot, final_slot);
            assert_eq!(r.loser_to.unwrap().slot, third_slot);
        }
    }

    #[test]
    fn no_two_routes_share_a_destination() {
        let mut destinations = Vec::new();
        for route in ROUTES {
            destinations.push((route.winner_to.slot, route.winner_to.side));
            if let Some(loser) = route.loser_to {
                destinations.push((loser.slot, loser.side));
            }
        }
        let before = destinations.len();
        destinations.sort_by_key(|(slot, side)| (slot.number(), *side == Side::TeamB));
        destinations.dedup();
        assert_eq!(before, destinations.len());
    }

    #[test]
    fn routes_never_target_a_sourcing_slot_of_an_earlier_stage() {
        // A destination slot must belong to a later round than its
        // source, so propagation cannot loop.
        for route in ROUTES {
            assert!(route.winner_to.slot.number() > route.slot.number());
            if let Some(loser) = route.loser_to {
                assert!(loser.slot.number() > route.slot.number());
            }
        }
    }
}
