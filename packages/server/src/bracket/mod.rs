//! Match lifecycle engine: field validation against the modality
//! configuration, winner resolution for closed matches, and
//! propagation of results through the fixed bracket topology.
//!
//! The rule checks and the propagation planning are pure functions
//! over entity models; only `propagate::apply` touches the database.
//! Handlers run them inside one transaction per close/reopen so a
//! failed check never leaves a half-applied bracket.

pub mod propagate;
pub mod resolve;
pub mod topology;
pub mod validate;

pub use propagate::{DownstreamWrite, apply, plan};
pub use resolve::resolve_winner;
pub use topology::{BranchTarget, Side, SlotRoute, route_for};
pub use validate::validate;
