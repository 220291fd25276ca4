//! Append-only record of every candidate the optimizer has issued.

use crate::error::{Error, Result};
use crate::param::CandidateVector;

/// Candidates indexed by trial id.
///
/// Trial ids are dense and start at 1, so the candidate for trial `t` lives
/// at slot `t - 1`. Entries are never replaced or removed; the evolutionary
/// phase reads parents' values back from here.
#[derive(Clone, Debug, Default)]
pub struct ProposalCache {
    entries: Vec<CandidateVector>,
}

impl ProposalCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the only trial id [`insert`](Self::insert) will accept next.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_trial_id(&self) -> u64 {
        self.entries.len() as u64 + 1
    }

    /// Stores the candidate for `trial_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonContiguousTrialId`] unless `trial_id` equals
    /// [`next_trial_id`](Self::next_trial_id).
    pub fn insert(&mut self, trial_id: u64, candidate: CandidateVector) -> Result<()> {
        let expected = self.next_trial_id();
        if trial_id != expected {
            return Err(Error::NonContiguousTrialId {
                expected,
                got: trial_id,
            });
        }
        self.entries.push(candidate);
        Ok(())
    }

    /// Returns the candidate issued for `trial_id`.
    #[must_use]
    pub fn get(&self, trial_id: u64) -> Option<&CandidateVector> {
        let index = usize::try_from(trial_id.checked_sub(1)?).ok()?;
        self.entries.get(index)
    }

    /// Returns the value trial `trial_id` used for dimension `dim`.
    #[must_use]
    pub fn value(&self, trial_id: u64, dim: usize) -> Option<f64> {
        self.get(trial_id)?.get(dim).map(|e| e.value)
    }

    /// Iterates over `(trial_id, candidate)` pairs in issue order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &CandidateVector)> {
        (1_u64..).zip(self.entries.iter())
    }
}
