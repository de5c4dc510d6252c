pub mod bracket_match;
pub mod dance;
pub mod modality;
pub mod point_entry;
pub mod shared;
pub mod standings;
pub mod team;
pub mod tournament;
