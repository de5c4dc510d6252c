use sea_orm::prelude::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bracket round a match belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, DeriveActiveEnum, EnumIter,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "PascalCase")]
pub enum Stage {
    #[sea_orm(string_value = "QuarterFinal")]
    QuarterFinal,
    #[sea_orm(string_value = "SemiFinal")]
    SemiFinal,
    #[sea_orm(string_value = "ThirdPlace")]
    ThirdPlace,
    #[sea_orm(string_value = "Final")]
    Final,
}

impl Stage {
    /// True for the two stages that award placement points in the
    /// general ranking (1st/2nd from the final, 3rd/4th from the
    /// third-place match).
    pub fn awards_placement(&self) -> bool {
        matches!(self, Self::ThirdPlace | Self::Final)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuarterFinal => "QuarterFinal",
            Self::SemiFinal => "SemiFinal",
            Self::ThirdPlace => "ThirdPlace",
            Self::Final => "Final",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed position of a match in the bracket.
///
/// Both supported bracket layouts share one namespace of twelve
/// positions: slots 1-8 form the eight-team bracket (four
/// quarterfinals, two semifinals, third place, final) and slots 9-12
/// form the four-team bracket (two semifinals, third place, final).
/// What a slot feeds into is defined by the routing table in
/// `bracket::topology`, not here.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, DeriveActiveEnum, EnumIter,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "PascalCase")]
pub enum BracketSlot {
    #[sea_orm(string_value = "First")]
    First,
    #[sea_orm(string_value = "Second")]
    Second,
    #[sea_orm(string_value = "Third")]
    Third,
    #[sea_orm(string_value = "Fourth")]
    Fourth,
    #[sea_orm(string_value = "Fifth")]
    Fifth,
    #[sea_orm(string_value = "Sixth")]
    Sixth,
    #[sea_orm(string_value = "Seventh")]
    Seventh,
    #[sea_orm(string_value = "Eighth")]
    Eighth,
    #[sea_orm(string_value = "Ninth")]
    Ninth,
    #[sea_orm(string_value = "Tenth")]
    Tenth,
    #[sea_orm(string_value = "Eleventh")]
    Eleventh,
    #[sea_orm(string_value = "Twelfth")]
    Twelfth,
}

impl BracketSlot {
    /// 1-based position number, mostly for logs.
    pub fn number(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
            Self::Fifth => 5,
            Self::Sixth => 6,
            Self::Seventh => 7,
            Self::Eighth => 8,
            Self::Ninth => 9,
            Self::Tenth => 10,
            Self::Eleventh => 11,
            Self::Twelfth => 12,
        }
    }
}

impl fmt::Display for BracketSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_serde_roundtrip() {
        for stage in [
            Stage::QuarterFinal,
            Stage::SemiFinal,
            Stage::ThirdPlace,
            Stage::Final,
        ] {
            let json = serde_json::to_string(&stage).unwrap();
            let parsed: Stage = serde_json::from_str(&json).unwrap();
            assert_eq!(stage, parsed);
        }
    }

    #[test]
    fn placement_stages() {
        assert!(Stage::Final.awards_placement());
        assert!(Stage::ThirdPlace.awards_placement());
        assert!(!Stage::SemiFinal.awards_placement());
        assert!(!Stage::QuarterFinal.awards_placement());
    }
}
