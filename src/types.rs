//! Core types and tuning constants for the optimizer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of trials drawn from the Sobol design before evolution starts.
pub const ORIGINAL_NUM: usize = 10;

/// Number of top-ranked trials that make up the parent pool.
pub const NUM_PARENT: usize = 5;

/// Trial id below which the exploration branch draws uniformly from the
/// bounds; from this id on it picks among the parent values instead.
pub const EXPLORER_NUM: u64 = 70;

/// Divisor of the sigmoid exploitation schedule.
pub const SCHEDULE_DIV: f64 = 15.0;

/// Which proposal phase handles a given trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// The trial is covered by the pre-generated Sobol design.
    Initial,
    /// The trial is proposed from ranked parents.
    Evolutionary,
}

/// Settings shared by the initial design and the evolutionary proposer.
///
/// [`Default`] yields [`ORIGINAL_NUM`], [`NUM_PARENT`], [`EXPLORER_NUM`]
/// and [`SCHEDULE_DIV`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvolutionConfig {
    /// Size of the Sobol design; trials `1..=original_num` come from it.
    pub original_num: usize,
    /// Size of the parent pool.
    pub num_parent: usize,
    /// Trial id at which exploration switches from uniform draws to parent picks.
    pub explorer_num: u64,
    /// Divisor of the sigmoid exploitation schedule.
    pub schedule_div: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            original_num: ORIGINAL_NUM,
            num_parent: NUM_PARENT,
            explorer_num: EXPLORER_NUM,
            schedule_div: SCHEDULE_DIV,
        }
    }
}

impl EvolutionConfig {
    /// Checks that the settings can drive a run to completion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the parent pool is empty, the
    /// Sobol design is too small to fill the parent pool, or the schedule
    /// divisor is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.num_parent == 0 {
            return Err(Error::InvalidConfig(
                "num_parent must be at least 1".to_string(),
            ));
        }
        if self.original_num < self.num_parent {
            return Err(Error::InvalidConfig(format!(
                "original_num ({}) must be at least num_parent ({})",
                self.original_num, self.num_parent
            )));
        }
        if !self.schedule_div.is_finite() || self.schedule_div <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "schedule_div must be positive and finite, got {}",
                self.schedule_div
            )));
        }
        Ok(())
    }

    /// Returns the phase that handles `trial_id`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn phase_for(&self, trial_id: u64) -> Phase {
        if trial_id <= self.original_num as u64 {
            Phase::Initial
        } else {
            Phase::Evolutionary
        }
    }
}
