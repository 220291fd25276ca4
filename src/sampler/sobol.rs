//! Initial design drawn from a scrambled Sobol sequence.
//!
//! The first `original_num` trials of a run are not informed by any
//! results, so they should cover the search space as evenly as possible.
//! [`SobolMatrix`] pre-generates that many points of a Sobol sequence
//! (scrambled via the Burley 2020 algorithm), one Sobol dimension per
//! parameter, and [`SobolMatrix::original_params`] turns the point for a
//! trial into a [`CandidateVector`].
//!
//! # How values are placed
//!
//! Each coordinate `u` in \[0, 1) is mapped with the parameter's
//! [`Scale`](crate::distribution::Scale):
//!
//! - bounds of exactly `[0, 1]` are treated as a synthetic log scale
//!   from `min(-5, log10(initial))` to `0`;
//! - positive bounds spanning two decades or more are sampled in
//!   `log10` space;
//! - everything else is linear, with `INT` parameters rounded half-up.
//!
//! # Example
//!
//! ```
//! use sobol_evo::parameter::{ParameterSpec, SearchSpace};
//! use sobol_evo::sampler::sobol::SobolMatrix;
//!
//! let space = SearchSpace::new(vec![
//!     ParameterSpec::float("x", -5.0, 5.0),
//!     ParameterSpec::int("n", 1.0, 8.0),
//! ])
//! .unwrap();
//!
//! let matrix = SobolMatrix::initialize(space.len(), 10).unwrap();
//! let first = matrix.original_params(1, &space).unwrap();
//! assert_eq!(first.len(), 2);
//! assert_eq!(first, matrix.original_params(1, &space).unwrap());
//! ```

use sobol_burley::{NUM_DIMENSIONS, sample};

use crate::error::{Error, Result};
use crate::param::{CandidateVector, ParamEntry};
use crate::parameter::{ParameterSpec, SearchSpace};
use crate::sampler::common;

/// Largest number of points the generator can index.
pub const MAX_SAMPLES: usize = 1 << 16;

/// Pre-generated Sobol points, stored dimension-major.
///
/// The same `(dimension_count, sample_count, seed)` always produces the
/// same matrix, and the matrix never changes after construction.
#[derive(Clone, Debug)]
pub struct SobolMatrix {
    dimension_count: usize,
    sample_count: usize,
    values: Vec<f64>,
}

impl SobolMatrix {
    /// Generates `sample_count` points in `dimension_count` dimensions with seed 0.
    ///
    /// # Errors
    ///
    /// See [`with_seed`](Self::with_seed).
    pub fn initialize(dimension_count: usize, sample_count: usize) -> Result<Self> {
        Self::with_seed(dimension_count, sample_count, 0)
    }

    /// Generates `sample_count` points in `dimension_count` dimensions.
    ///
    /// Different seeds give statistically independent scramblings of the
    /// same sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyDimensions`] if `dimension_count` exceeds the
    /// number of dimensions the generator supports, or
    /// [`Error::InvalidConfig`] if `sample_count` exceeds [`MAX_SAMPLES`].
    pub fn with_seed(dimension_count: usize, sample_count: usize, seed: u32) -> Result<Self> {
        let max = NUM_DIMENSIONS as usize;
        if dimension_count > max {
            return Err(Error::TooManyDimensions {
                got: dimension_count,
                max,
            });
        }
        let n = u32::try_from(sample_count)
            .ok()
            .filter(|_| sample_count <= MAX_SAMPLES)
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "sample count {sample_count} exceeds the Sobol sequence length ({MAX_SAMPLES})"
                ))
            })?;

        let mut values = Vec::with_capacity(dimension_count * sample_count);
        for dim in (0..NUM_DIMENSIONS).take(dimension_count) {
            values.extend((0..n).map(|index| f64::from(sample(index, dim, seed))));
        }

        Ok(Self {
            dimension_count,
            sample_count,
            values,
        })
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn dimension_count(&self) -> usize {
        self.dimension_count
    }

    /// Returns the number of points.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Returns coordinate `dimension_index` of point `sample_index`, in \[0, 1),
    /// or `None` if either index is out of range.
    #[must_use]
    pub fn value_at(&self, dimension_index: usize, sample_index: usize) -> Option<f64> {
        if dimension_index >= self.dimension_count || sample_index >= self.sample_count {
            return None;
        }
        self.values
            .get(dimension_index * self.sample_count + sample_index)
            .copied()
    }

    /// Builds the candidate for an initial-design trial.
    ///
    /// Trial `t` uses point `t - 1`; parameter `i` uses dimension `i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrialOutOfRange`] unless `1 <= trial_id <= sample_count`,
    /// and [`Error::DimensionMismatch`] if `space` does not have
    /// `dimension_count` parameters.
    pub fn original_params(&self, trial_id: u64, space: &SearchSpace) -> Result<CandidateVector> {
        if space.len() != self.dimension_count {
            return Err(Error::DimensionMismatch {
                expected: self.dimension_count,
                got: space.len(),
            });
        }
        let sample_index = trial_id
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .filter(|&i| i < self.sample_count)
            .ok_or(Error::TrialOutOfRange {
                trial_id,
                sample_count: self.sample_count,
            })?;

        let entries = space
            .iter()
            .enumerate()
            .map(|(dim, spec)| {
                self.value_at(dim, sample_index)
                    .map(|u| ParamEntry::new(spec, map_unit(u, spec)))
                    .ok_or(Error::Internal("Sobol point missing from matrix"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(CandidateVector::new(entries))
    }
}

/// Maps a unit coordinate onto `spec`'s native range.
///
/// Log-mapped values are never rounded, even for `INT` parameters; linear
/// `INT` values are rounded half-up onto the whole numbers inside the bounds.
#[must_use]
pub fn map_unit(u: f64, spec: &ParameterSpec) -> f64 {
    let scale = spec.scale();
    let value = scale.apply(u);
    if !scale.is_log() && spec.kind().is_int() {
        common::to_int_range(value, spec)
    } else {
        value.clamp(spec.lower(), spec.upper())
    }
}

#[cfg(test)]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
mod tests {
    use super::*;

    fn space() -> SearchSpace {
        SearchSpace::new(vec![
            ParameterSpec::float("x", -5.0, 5.0),
            ParameterSpec::int("n", 0.0, 10.0),
            ParameterSpec::float("lr", 1e-5, 1e-1),
            ParameterSpec::float("dropout", 0.0, 1.0).initial(1e-3),
            ParameterSpec::log("scale", 1.0, 50.0),
        ])
        .unwrap()
    }

    #[test]
    fn coordinates_in_unit_interval() {
        let matrix = SobolMatrix::initialize(4, 64).unwrap();
        for dim in 0..4 {
            for i in 0..64 {
                let u = matrix.value_at(dim, i).unwrap();
                assert!((0.0..1.0).contains(&u), "u = {u} at ({dim}, {i})");
            }
        }
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let a = SobolMatrix::with_seed(3, 10, 42).unwrap();
        let b = SobolMatrix::with_seed(3, 10, 42).unwrap();
        for dim in 0..3 {
            for i in 0..10 {
                assert_eq!(a.value_at(dim, i), b.value_at(dim, i));
            }
        }
    }

    #[test]
    fn different_seeds_produce_different_points() {
        let a = SobolMatrix::with_seed(1, 10, 0).unwrap();
        let b = SobolMatrix::with_seed(1, 10, 12345).unwrap();
        let any_different = (0..10).any(|i| a.value_at(0, i) != b.value_at(0, i));
        assert!(any_different, "different seeds should scramble differently");
    }

    #[test]
    fn dimensions_differ() {
        let matrix = SobolMatrix::initialize(2, 8).unwrap();
        let same = (0..8).all(|i| matrix.value_at(0, i) == matrix.value_at(1, i));
        assert!(!same, "each parameter should use its own Sobol dimension");
    }

    #[test]
    fn stratifies_power_of_two_prefix() {
        let matrix = SobolMatrix::initialize(1, 8).unwrap();
        let mut bins = [0u32; 8];
        for i in 0..8 {
            let bin = ((matrix.value_at(0, i).unwrap() * 8.0).floor() as usize).min(7);
            bins[bin] += 1;
        }
        let filled = bins.iter().filter(|&&c| c > 0).count();
        assert!(filled >= 6, "expected near-stratified coverage, got {bins:?}");
    }

    #[test]
    fn value_at_out_of_range_is_none() {
        let matrix = SobolMatrix::initialize(2, 4).unwrap();
        assert!(matrix.value_at(1, 3).is_some());
        assert_eq!(matrix.value_at(2, 0), None);
        assert_eq!(matrix.value_at(0, 4), None);
    }

    #[test]
    fn rejects_more_samples_than_the_sequence_holds() {
        assert!(SobolMatrix::initialize(1, MAX_SAMPLES).is_ok());
        let err = SobolMatrix::initialize(1, MAX_SAMPLES + 1).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_too_many_dimensions() {
        let err = SobolMatrix::initialize(NUM_DIMENSIONS as usize + 1, 10).unwrap_err();
        assert!(matches!(err, Error::TooManyDimensions { .. }));
    }

    #[test]
    fn original_params_within_bounds() {
        let space = space();
        let matrix = SobolMatrix::initialize(space.len(), 10).unwrap();
        for trial_id in 1..=10 {
            let candidate = matrix.original_params(trial_id, &space).unwrap();
            assert_eq!(candidate.len(), space.len());
            for (entry, spec) in candidate.iter().zip(&space) {
                assert_eq!(entry.name, spec.name());
                assert!(
                    (spec.lower()..=spec.upper()).contains(&entry.value),
                    "{} = {} outside [{}, {}]",
                    entry.name,
                    entry.value,
                    spec.lower(),
                    spec.upper()
                );
            }
            let n = candidate.value_of("n").unwrap();
            assert!((n - n.round()).abs() < f64::EPSILON, "n = {n} is not whole");
        }
    }

    #[test]
    fn original_params_rejects_out_of_range_trials() {
        let space = space();
        let matrix = SobolMatrix::initialize(space.len(), 10).unwrap();
        assert!(matches!(
            matrix.original_params(0, &space),
            Err(Error::TrialOutOfRange { trial_id: 0, .. })
        ));
        assert!(matches!(
            matrix.original_params(11, &space),
            Err(Error::TrialOutOfRange { trial_id: 11, .. })
        ));
    }

    #[test]
    fn original_params_rejects_wrong_space() {
        let matrix = SobolMatrix::initialize(2, 10).unwrap();
        let err = matrix.original_params(1, &space()).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 2, got: 5 }));
    }

    #[test]
    fn log_mapping_midpoint() {
        let spec = ParameterSpec::float("c", 1.0, 100.0);
        assert!((map_unit(0.5, &spec) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn unit_bounds_map_into_log_range() {
        let spec = ParameterSpec::float("dropout", 0.0, 1.0).initial(1e-3);
        assert!((map_unit(0.0, &spec) - 1e-5).abs() < 1e-15);
        assert!((map_unit(0.5, &spec) - 10_f64.powf(-2.5)).abs() < 1e-12);
    }

    #[test]
    fn linear_int_rounds_half_up() {
        let spec = ParameterSpec::int("n", 0.0, 5.0);
        assert!((map_unit(0.5, &spec) - 3.0).abs() < f64::EPSILON);
        assert!((map_unit(0.498, &spec) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn log_mapped_int_is_not_rounded() {
        let spec = ParameterSpec::int("n", 1.0, 1000.0);
        let v = map_unit(0.25, &spec);
        assert!((v - 10_f64.powf(0.75)).abs() < 1e-9);
    }
}
