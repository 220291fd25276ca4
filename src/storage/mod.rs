//! Objective history backends.
//!
//! The optimizer never owns evaluation results. It reads them through the
//! [`ObjectiveHistory`] trait, which the driving loop (or whatever records
//! outcomes) implements. Every [`Optimizer`](crate::Optimizer) holds an
//! `Arc` to its history so the same store can be written by the caller
//! while the optimizer reads it.
//!
//! # Available backends
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`MemoryStorage`] | In-memory map behind a read-write lock (the default) |
//!
//! # Implementing a custom backend
//!
//! Implement [`ObjectiveHistory`] over your own trial database. Only two
//! read methods are needed: [`trial_ids`](ObjectiveHistory::trial_ids) and
//! [`objective`](ObjectiveHistory::objective).
//!
//! ```
//! use std::sync::Arc;
//!
//! use sobol_evo::parameter::{ParameterSpec, SearchSpace};
//! use sobol_evo::storage::MemoryStorage;
//! use sobol_evo::Optimizer;
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let space = SearchSpace::new(vec![ParameterSpec::float("x", 0.0, 1.0)]).unwrap();
//! let optimizer = Optimizer::builder()
//!     .space(space)
//!     .storage(Arc::clone(&storage))
//!     .build()
//!     .unwrap();
//! # let _ = optimizer;
//! ```

use std::sync::Arc;

mod memory;
pub use memory::MemoryStorage;

/// Read-only view of recorded objective values.
///
/// Lower objectives are better. A trial whose evaluation is still in
/// flight simply has no objective yet; that is the expected steady state,
/// not an error.
///
/// Implementations must be `Send + Sync` because the store is usually
/// shared with the loop that records results.
pub trait ObjectiveHistory: Send + Sync {
    /// Return every trial id the store knows about, or `None` if it knows none.
    fn trial_ids(&self) -> Option<Vec<u64>>;

    /// Return the objective recorded for `trial_id`, if it has resolved.
    fn objective(&self, trial_id: u64) -> Option<f64>;
}

impl<T: ObjectiveHistory + ?Sized> ObjectiveHistory for Arc<T> {
    fn trial_ids(&self) -> Option<Vec<u64>> {
        (**self).trial_ids()
    }

    fn objective(&self, trial_id: u64) -> Option<f64> {
        (**self).objective(trial_id)
    }
}
