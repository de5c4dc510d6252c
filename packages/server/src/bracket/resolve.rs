use crate::entity::{bracket_match, modality};

/// Compute the winner of a match whose fields already passed the rule
/// checks for its current combination.
///
/// Total and deterministic over every valid field combination.
/// Returns `None` only when the fields are insufficiently populated
/// to decide, i.e. the match is not actually closeable. An equal main
/// score with the tie flag unset is rejected upstream by
/// `validate` and never reaches this function on the close path.
pub fn resolve_winner(m: &bracket_match::Model, modality: &modality::Model) -> Option<i32> {
    // Walkover: the team that did not forfeit wins, scores ignored.
    if m.walkover == Some(true) {
        let forfeited = m.walkover_team_id?;
        return match (m.team_a_id, m.team_b_id) {
            (Some(a), Some(b)) if forfeited == a => Some(b),
            (Some(a), Some(b)) if forfeited == b => Some(a),
            _ => None,
        };
    }

    // Unscored modality: the winner is whatever was explicitly chosen.
    if !modality.has_score {
        return m.winner_id;
    }

    if m.tied == Some(true) {
        let ta = m.tiebreak_a?;
        let tb = m.tiebreak_b?;
        return if ta > tb {
            m.team_a_id
        } else if tb > ta {
            m.team_b_id
        } else {
            None
        };
    }

    let a = m.score_a?;
    let b = m.score_b?;
    if a > b {
        m.team_a_id
    } else if b > a {
        m.team_b_id
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_support::{match_between, scored_modality, unscored_modality};

    #[test]
    fn higher_score_wins() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(10), Some(20));
        m.score_a = Some(3);
        m.score_b = Some(1);
        assert_eq!(resolve_winner(&m, &modality), Some(10));

        m.score_a = Some(0);
        m.score_b = Some(2);
        assert_eq!(resolve_winner(&m, &modality), Some(20));
    }

    #[test]
    fn tiebreak_decides_tied_match() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(10), Some(20));
        m.score_a = Some(2);
        m.score_b = Some(2);
        m.tied = Some(true);
        m.tiebreak_a = Some(4);
        m.tiebreak_b = Some(6);
        assert_eq!(resolve_winner(&m, &modality), Some(20));
    }

    #[test]
    fn walkover_winner_is_the_other_team_regardless_of_fields() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(10), Some(20));
        m.walkover = Some(true);
        m.walkover_team_id = Some(10);
        // Stray fields must not change the outcome.
        m.score_a = Some(9);
        m.score_b = Some(0);
        m.tied = Some(true);
        assert_eq!(resolve_winner(&m, &modality), Some(20));

        m.walkover_team_id = Some(20);
        assert_eq!(resolve_winner(&m, &modality), Some(10));
    }

    #[test]
    fn unscored_modality_uses_explicit_selection() {
        let modality = unscored_modality();
        let mut m = match_between(Some(10), Some(20));
        assert_eq!(resolve_winner(&m, &modality), None);

        m.winner_id = Some(20);
        assert_eq!(resolve_winner(&m, &modality), Some(20));
    }

    #[test]
    fn insufficient_fields_yield_no_winner() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(10), Some(20));
        assert_eq!(resolve_winner(&m, &modality), None);

        m.score_a = Some(2);
        assert_eq!(resolve_winner(&m, &modality), None);

        // Walkover with a missing team reference.
        let mut w = match_between(Some(10), None);
        w.walkover = Some(true);
        w.walkover_team_id = Some(10);
        assert_eq!(resolve_winner(&w, &modality), None);
    }

    #[test]
    fn resolution_is_deterministic() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(10), Some(20));
        m.score_a = Some(5);
        m.score_b = Some(4);
        let first = resolve_winner(&m, &modality);
        assert_eq!(first, resolve_winner(&m, &modality));
        assert_eq!(first, Some(10));
    }
}
