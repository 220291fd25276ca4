#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Black-box parameter search that starts with a scrambled Sobol design and
//! continues with rank-weighted evolutionary proposals. Each call to
//! [`Optimizer::generate_parameter`] returns one candidate; the caller
//! evaluates it and records the objective (lower is better) in a shared
//! [`ObjectiveHistory`](storage::ObjectiveHistory).
//!
//! # Getting Started
//!
//! ```
//! use sobol_evo::prelude::*;
//!
//! let space = SearchSpace::new(vec![
//!     ParameterSpec::float("x", -5.0, 5.0),
//!     ParameterSpec::int("n", 1.0, 10.0),
//! ])
//! .unwrap();
//! let mut optimizer = Optimizer::builder().space(space).seed(1).build().unwrap();
//!
//! for _ in 0..40 {
//!     let proposal = optimizer.generate_parameter().unwrap();
//!     let x = proposal.params.value_of("x").unwrap();
//!     let n = proposal.params.value_of("n").unwrap();
//!     optimizer
//!         .storage()
//!         .record(proposal.trial_id, x * x + (n - 4.0).abs());
//! }
//!
//! let best = optimizer.best().unwrap();
//! println!("best trial {} -> {:.4}", best.trial_id, best.objective);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Optimizer`] | Issue trial ids and candidates, dispatching between the two phases. |
//! | [`SearchSpace`](parameter::SearchSpace) | The ordered, validated list of [`ParameterSpec`](parameter::ParameterSpec)s. |
//! | [`CandidateVector`](param::CandidateVector) | One proposed value per parameter, in search-space order. |
//! | [`SobolMatrix`](sampler::SobolMatrix) | The pre-generated initial design. |
//! | [`EvolutionaryProposer`](sampler::EvolutionaryProposer) | Breeds candidates from the best recorded trials. |
//! | [`ObjectiveHistory`](storage::ObjectiveHistory) | Read-only view of recorded objectives. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on public types, [`SearchSpace::from_json`](parameter::SearchSpace::from_json) | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key proposal points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod cache;
pub mod distribution;
mod error;
mod optimizer;
pub mod param;
pub mod parameter;
mod rng_util;
pub mod sampler;
pub mod storage;
mod types;

pub use error::{Error, Result};
pub use optimizer::{BestTrial, Optimizer, OptimizerBuilder, Proposal};
pub use types::{EXPLORER_NUM, EvolutionConfig, NUM_PARENT, ORIGINAL_NUM, Phase, SCHEDULE_DIV};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use sobol_evo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cache::ProposalCache;
    pub use crate::error::{Error, Result};
    pub use crate::optimizer::{BestTrial, Optimizer, OptimizerBuilder, Proposal};
    pub use crate::param::{CandidateVector, ParamEntry};
    pub use crate::parameter::{ParamType, ParameterSpec, SearchSpace};
    pub use crate::sampler::{EvolutionaryProposer, SobolMatrix};
    pub use crate::storage::{MemoryStorage, ObjectiveHistory};
    pub use crate::types::{EvolutionConfig, Phase};
}
