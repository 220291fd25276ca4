//! Rank-weighted evolutionary proposals.
//!
//! Once the Sobol design is used up, every new candidate is bred from the
//! best trials seen so far:
//!
//! 1. Trials with a resolved objective are sorted ascending (lower is
//!    better) and the best `num_parent` form the parent pool.
//! 2. For each parameter independently, a parent is drawn with
//!    probability given by a softmax over rank scores
//!    `num_parent, ..., 1` (see [`rank_weights`]).
//! 3. With probability [`schedule_rate`] the parent's value is
//!    **exploited**: perturbed by Gaussian noise with standard deviation
//!    `(upper - lower) / trial_id` and clamped to the bounds. Otherwise
//!    it is **explored**: replaced by a uniform draw while
//!    `trial_id < explorer_num`, and by a uniform pick among the parents'
//!    values after that.
//!
//! The exploitation rate is a sigmoid of the trial id that crosses 0.5 at
//! the first evolutionary trial and tends to 1, while the perturbation
//! width shrinks as `1 / trial_id`, so the search narrows over time.

use crate::cache::ProposalCache;
use crate::error::{Error, Result};
use crate::param::{CandidateVector, ParamEntry};
use crate::parameter::SearchSpace;
use crate::rng_util;
use crate::sampler::common;
use crate::storage::ObjectiveHistory;
use crate::types::EvolutionConfig;

/// A member of the parent pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parent {
    /// The parent's trial id.
    pub trial_id: u64,
    /// The parent's objective value.
    pub objective: f64,
}

/// Softmax weights over rank scores `num_parent, num_parent - 1, ..., 1`.
///
/// Index 0 is the best rank. The weights sum to 1 and strictly decrease.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rank_weights(num_parent: usize) -> Vec<f64> {
    if num_parent == 0 {
        return Vec::new();
    }
    // Shift by the largest score so the exponentials stay in range.
    let top = num_parent as f64;
    let exps: Vec<f64> = (1..=num_parent)
        .rev()
        .map(|score| (score as f64 - top).exp())
        .collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Probability of exploiting a parent for `trial_id`.
///
/// `1 / (1 + exp(-(trial_id - original_num - 1) / schedule_div))`: exactly
/// 0.5 at `trial_id = original_num + 1` and strictly increasing after.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn schedule_rate(trial_id: u64, original_num: usize, schedule_div: f64) -> f64 {
    let offset = trial_id as f64 - original_num as f64 - 1.0;
    1.0 / (1.0 + (-offset / schedule_div).exp())
}

/// Breeds candidates from the best trials recorded so far.
///
/// The proposer is stateless apart from its configuration and the rank
/// weights, which are fixed at construction. Candidate history and
/// randomness are passed in on every call.
#[derive(Clone, Debug)]
pub struct EvolutionaryProposer {
    config: EvolutionConfig,
    weights: Vec<f64>,
}

impl EvolutionaryProposer {
    /// Creates a proposer for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` fails
    /// [`EvolutionConfig::validate`].
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        let weights = rank_weights(config.num_parent);
        Ok(Self { config, weights })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Returns the parent-selection weights, best rank first.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Ranks the cached trials with a resolved objective and returns the
    /// best `num_parent`, best first.
    ///
    /// Only trial ids `1..=cache.len()` are considered. Trials whose
    /// objective has not resolved are skipped. Ties keep trial-id order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientHistory`] if fewer than `num_parent`
    /// trials have a resolved objective.
    pub fn parent_pool<H>(&self, cache: &ProposalCache, history: &H) -> Result<Vec<Parent>>
    where
        H: ObjectiveHistory + ?Sized,
    {
        let mut eligible: Vec<Parent> = cache
            .iter()
            .filter_map(|(trial_id, _)| {
                history
                    .objective(trial_id)
                    .map(|objective| Parent { trial_id, objective })
            })
            .collect();

        if eligible.len() < self.config.num_parent {
            trace_info!(
                required = self.config.num_parent,
                available = eligible.len(),
                "not enough resolved objectives for a parent pool"
            );
            return Err(Error::InsufficientHistory {
                required: self.config.num_parent,
                available: eligible.len(),
            });
        }

        eligible.sort_by(|a, b| a.objective.total_cmp(&b.objective));
        eligible.truncate(self.config.num_parent);
        Ok(eligible)
    }

    /// Proposes the candidate for `trial_id`.
    ///
    /// The caller is responsible for storing the result in `cache`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientHistory`] if the parent pool cannot be
    /// filled, and [`Error::DimensionMismatch`] if a cached parent does not
    /// cover every parameter of `space`.
    pub fn propose<H>(
        &self,
        trial_id: u64,
        space: &SearchSpace,
        cache: &ProposalCache,
        history: &H,
        rng: &mut fastrand::Rng,
    ) -> Result<CandidateVector>
    where
        H: ObjectiveHistory + ?Sized,
    {
        let pool = self.parent_pool(cache, history)?;
        trace_debug!(
            trial_id,
            best_trial = pool[0].trial_id,
            best_objective = pool[0].objective,
            "selected parent pool"
        );

        let exploitation_rate =
            schedule_rate(trial_id, self.config.original_num, self.config.schedule_div);
        #[allow(clippy::cast_precision_loss)]
        let shrink = trial_id.max(1) as f64;

        let mut entries = Vec::with_capacity(space.len());
        for (dim, spec) in space.iter().enumerate() {
            let hp_bests = pool
                .iter()
                .map(|p| parent_value(cache, p.trial_id, dim, space.len()))
                .collect::<Result<Vec<f64>>>()?;
            let chosen = rng_util::weighted_index(rng, &self.weights);
            let mut next_value = hp_bests[chosen];

            if rng.f64() < exploitation_rate {
                let sigma = (spec.upper() - spec.lower()) / shrink;
                next_value = (next_value + rng_util::normal(rng, 0.0, sigma))
                    .clamp(spec.lower(), spec.upper());
            } else if trial_id < self.config.explorer_num {
                next_value = rng_util::f64_range(rng, spec.lower(), spec.upper());
            } else {
                next_value = hp_bests[rng.usize(..hp_bests.len())];
            }

            entries.push(ParamEntry::new(spec, common::finalize(next_value, spec)));
        }

        Ok(CandidateVector::new(entries))
    }
}

fn parent_value(cache: &ProposalCache, trial_id: u64, dim: usize, expected: usize) -> Result<f64> {
    let candidate = cache
        .get(trial_id)
        .ok_or(Error::Internal("parent trial missing from proposal cache"))?;
    candidate
        .get(dim)
        .map(|e| e.value)
        .ok_or(Error::DimensionMismatch {
            expected,
            got: candidate.len(),
        })
}
