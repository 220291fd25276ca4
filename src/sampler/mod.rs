//! The two proposal phases.
//!
//! | Phase | Module | Trials |
//! |-------|--------|--------|
//! | Space-filling initial design | [`sobol`] | `1..=original_num` |
//! | Rank-weighted evolution | [`evolutionary`] | `original_num + 1..` |
//!
//! [`Optimizer`](crate::Optimizer) dispatches between them; both can also
//! be used directly.

mod common;
pub mod evolutionary;
pub mod sobol;

pub use evolutionary::{EvolutionaryProposer, Parent, rank_weights, schedule_rate};
pub use sobol::{SobolMatrix, map_unit};
