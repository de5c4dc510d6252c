use crate::entity::{bracket_match, modality};
use crate::error::FieldError;

/// Check a candidate match state against its modality configuration.
///
/// Returns every applicable failure at once (empty = valid) so the
/// form layer can highlight all offending fields in a single round
/// trip. Must be re-run on every attempted save before anything is
/// persisted. Pure: no database access, no side effects.
///
/// Field presence of tournament, modality, stage, slot and date is
/// guaranteed by the request types; only conditional rules live here.
pub fn validate(m: &bracket_match::Model, modality: &modality::Model) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let (Some(a), Some(b)) = (m.team_a_id, m.team_b_id)
        && a == b
    {
        errors.push(FieldError::new(
            "team_b_id",
            "Team A and Team B must differ",
        ));
    }

    if m.started && (m.team_a_id.is_none() || m.team_b_id.is_none()) {
        errors.push(FieldError::new(
            "started",
            "Both teams must be set before the match starts",
        ));
    }

    if m.closed && !m.started {
        errors.push(FieldError::new(
            "closed",
            "Only a started match can be closed",
        ));
    }

    let is_walkover = m.walkover == Some(true);

    if is_walkover {
        match m.walkover_team_id {
            None => errors.push(FieldError::new(
                "walkover_team_id",
                "Select which team forfeited",
            )),
            Some(w) if Some(w) != m.team_a_id && Some(w) != m.team_b_id => {
                errors.push(FieldError::new(
                    "walkover_team_id",
                    "The forfeiting team must be one of the match teams",
                ));
            }
            Some(_) => {}
        }
        if modality.has_score {
            for field in populated_score_fields(m) {
                errors.push(FieldError::new(
                    field,
                    "A walkover match must not carry a score",
                ));
            }
        }
    }

    if modality.has_score {
        if m.closed && !is_walkover {
            match (m.score_a, m.score_b) {
                (Some(a), Some(b)) => {
                    if a == b {
                        if m.tied != Some(true) {
                            errors.push(FieldError::new(
                                "tied",
                                "An equal score requires the tie flag",
                            ));
                        } else {
                            check_tiebreak(m, &mut errors);
                        }
                    }
                }
                (sa, sb) => {
                    if sa.is_none() {
                        errors.push(FieldError::new(
                            "score_a",
                            "Both scores are required to close the match",
                        ));
                    }
                    if sb.is_none() {
                        errors.push(FieldError::new(
                            "score_b",
                            "Both scores are required to close the match",
                        ));
                    }
                }
            }
        }
        if !modality.has_sets && !is_walkover {
            for field in populated_set_fields(m) {
                errors.push(FieldError::new(field, "This modality does not use sets"));
            }
        }
    } else {
        for field in populated_score_fields(m) {
            errors.push(FieldError::new(field, "This modality does not use scores"));
        }
        match m.winner_id {
            Some(w) if Some(w) != m.team_a_id && Some(w) != m.team_b_id => {
                errors.push(FieldError::new(
                    "winner_id",
                    "The winner must be one of the match teams",
                ));
            }
            None if m.closed && !is_walkover => {
                errors.push(FieldError::new(
                    "winner_id",
                    "Select a winner to close the match",
                ));
            }
            _ => {}
        }
    }

    errors
}

fn check_tiebreak(m: &bracket_match::Model, errors: &mut Vec<FieldError>) {
    match (m.tiebreak_a, m.tiebreak_b) {
        (Some(ta), Some(tb)) if ta == tb => {
            errors.push(FieldError::new(
                "tiebreak_b",
                "Tiebreak scores must differ",
            ));
        }
        (Some(_), Some(_)) => {}
        (ta, tb) => {
            if ta.is_none() {
                errors.push(FieldError::new(
                    "tiebreak_a",
                    "Both tiebreak scores are required",
                ));
            }
            if tb.is_none() {
                errors.push(FieldError::new(
                    "tiebreak_b",
                    "Both tiebreak scores are required",
                ));
            }
        }
    }
}

/// Score-carrying fields currently populated, in column order.
fn populated_score_fields(m: &bracket_match::Model) -> Vec<&'static str> {
    let mut fields = Vec::new();
    let pairs: [(&'static str, Option<i32>); 10] = [
        ("score_a", m.score_a),
        ("score_b", m.score_b),
        ("set1_a", m.set1_a),
        ("set1_b", m.set1_b),
        ("set2_a", m.set2_a),
        ("set2_b", m.set2_b),
        ("set3_a", m.set3_a),
        ("set3_b", m.set3_b),
        ("tiebreak_a", m.tiebreak_a),
        ("tiebreak_b", m.tiebreak_b),
    ];
    for (name, value) in pairs {
        if value.is_some() {
            fields.push(name);
        }
    }
    fields
}

fn populated_set_fields(m: &bracket_match::Model) -> Vec<&'static str> {
    let mut fields = Vec::new();
    let pairs: [(&'static str, Option<i32>); 6] = [
        ("set1_a", m.set1_a),
        ("set1_b", m.set1_b),
        ("set2_a", m.set2_a),
        ("set2_b", m.set2_b),
        ("set3_a", m.set3_a),
        ("set3_b", m.set3_b),
    ];
    for (name, value) in pairs {
        if value.is_some() {
            fields.push(name);
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_support::{match_between, scored_modality, unscored_modality};

    fn assert_field(errors: &[FieldError], field: &str) {
        assert!(
            errors.iter().any(|e| e.field == field),
            "expected an error on {field}, got {errors:?}"
        );
    }

    #[test]
    fn open_match_with_no_teams_is_valid() {
        let modality = scored_modality(false);
        let mut m = match_between(None, None);
        m.started = false;
        assert!(validate(&m, &modality).is_empty());
    }

    #[test]
    fn equal_teams_rejected() {
        let modality = scored_modality(false);
        let m = match_between(Some(7), Some(7));
        let errors = validate(&m, &modality);
        assert_field(&errors, "team_b_id");
    }

    #[test]
    fn started_requires_both_teams() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(1), None);
        m.started = true;
        assert_field(&validate(&m, &modality), "started");
    }

    #[test]
    fn closing_requires_started() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(1), Some(2));
        m.started = false;
        m.closed = true;
        m.score_a = Some(2);
        m.score_b = Some(0);
        assert_field(&validate(&m, &modality), "closed");
    }

    #[test]
    fn walkover_requires_participating_team() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(1), Some(2));
        m.started = true;
        m.walkover = Some(true);

        m.walkover_team_id = None;
        assert_field(&validate(&m, &modality), "walkover_team_id");

        m.walkover_team_id = Some(99);
        assert_field(&validate(&m, &modality), "walkover_team_id");

        m.walkover_team_id = Some(2);
        assert!(validate(&m, &modality).is_empty());
    }

    #[test]
    fn walkover_must_not_carry_score() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(1), Some(2));
        m.started = true;
        m.walkover = Some(true);
        m.walkover_team_id = Some(1);
        m.score_a = Some(3);
        m.tiebreak_b = Some(1);
        let errors = validate(&m, &modality);
        assert_field(&errors, "score_a");
        assert_field(&errors, "tiebreak_b");
    }

    #[test]
    fn closing_scored_match_requires_both_scores() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(1), Some(2));
        m.started = true;
        m.closed = true;
        m.score_a = Some(3);
        let errors = validate(&m, &modality);
        assert_field(&errors, "score_b");
        assert!(!errors.iter().any(|e| e.field == "score_a"));
    }

    #[test]
    fn equal_score_requires_tie_flag_and_distinct_tiebreaks() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(1), Some(2));
        m.started = true;
        m.closed = true;
        m.score_a = Some(1);
        m.score_b = Some(1);

        assert_field(&validate(&m, &modality), "tied");

        m.tied = Some(true);
        let errors = validate(&m, &modality);
        assert_field(&errors, "tiebreak_a");
        assert_field(&errors, "tiebreak_b");

        m.tiebreak_a = Some(5);
        m.tiebreak_b = Some(5);
        assert_field(&validate(&m, &modality), "tiebreak_b");

        m.tiebreak_b = Some(3);
        assert!(validate(&m, &modality).is_empty());
    }

    #[test]
    fn sets_rejected_when_modality_has_no_sets() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(1), Some(2));
        m.set1_a = Some(25);
        m.set1_b = Some(20);
        let errors = validate(&m, &modality);
        assert_field(&errors, "set1_a");
        assert_field(&errors, "set1_b");

        let with_sets = scored_modality(true);
        assert!(validate(&m, &with_sets).is_empty());
    }

    #[test]
    fn unscored_modality_rejects_any_score_field() {
        let modality = unscored_modality();
        let mut m = match_between(Some(1), Some(2));
        m.score_b = Some(4);
        m.set2_a = Some(11);
        let errors = validate(&m, &modality);
        assert_field(&errors, "score_b");
        assert_field(&errors, "set2_a");
    }

    #[test]
    fn unscored_modality_requires_explicit_winner_to_close() {
        let modality = unscored_modality();
        let mut m = match_between(Some(1), Some(2));
        m.started = true;
        m.closed = true;
        assert_field(&validate(&m, &modality), "winner_id");

        m.winner_id = Some(99);
        assert_field(&validate(&m, &modality), "winner_id");

        m.winner_id = Some(1);
        assert!(validate(&m, &modality).is_empty());
    }

    #[test]
    fn unscored_walkover_closes_without_winner_selection() {
        let modality = unscored_modality();
        let mut m = match_between(Some(1), Some(2));
        m.started = true;
        m.closed = true;
        m.walkover = Some(true);
        m.walkover_team_id = Some(1);
        assert!(validate(&m, &modality).is_empty());
    }

    #[test]
    fn all_failures_reported_together() {
        let modality = scored_modality(false);
        let mut m = match_between(Some(3), Some(3));
        m.started = true;
        m.closed = true;
        let errors = validate(&m, &modality);
        assert_field(&errors, "team_b_id");
        assert_field(&errors, "score_a");
        assert_field(&errors, "score_b");
        assert!(errors.len() >= 3);
    }
}
