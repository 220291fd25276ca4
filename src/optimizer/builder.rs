use std::sync::Arc;

use super::Optimizer;
use crate::cache::ProposalCache;
use crate::error::Result;
use crate::parameter::{ParameterSpec, SearchSpace};
use crate::sampler::{EvolutionaryProposer, SobolMatrix};
use crate::storage::{MemoryStorage, ObjectiveHistory};
use crate::types::EvolutionConfig;

/// A builder for constructing [`Optimizer`] instances with a fluent API.
///
/// Created via [`Optimizer::builder()`].
///
/// # Defaults
///
/// - Evolution settings: [`EvolutionConfig::default()`]
/// - RNG: seeded from entropy, so runs differ unless [`seed`](Self::seed) is set
/// - Sobol scramble seed: 0
/// - Storage: a fresh [`MemoryStorage`]
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use sobol_evo::parameter::ParameterSpec;
/// use sobol_evo::storage::MemoryStorage;
/// use sobol_evo::Optimizer;
///
/// let storage = Arc::new(MemoryStorage::new());
/// let optimizer = Optimizer::builder()
///     .param(ParameterSpec::float("x", 0.0, 1.0))
///     .param(ParameterSpec::int("n", 1.0, 16.0))
///     .original_num(12)
///     .seed(7)
///     .storage(storage)
///     .build()
///     .unwrap();
///
/// assert_eq!(optimizer.config().original_num, 12);
/// ```
pub struct OptimizerBuilder<S: ?Sized = MemoryStorage> {
    params: Vec<ParameterSpec>,
    config: EvolutionConfig,
    seed: Option<u64>,
    sobol_seed: u32,
    storage: Arc<S>,
}

impl OptimizerBuilder {
    /// Create a new builder with default settings.
    pub(super) fn new() -> Self {
        Self {
            params: Vec::new(),
            config: EvolutionConfig::default(),
            seed: None,
            sobol_seed: 0,
            storage: Arc::new(MemoryStorage::new()),
        }
    }
}

impl<S: ObjectiveHistory + ?Sized> OptimizerBuilder<S> {
    /// Replace the parameters with those of `space`.
    #[must_use]
    pub fn space(mut self, space: SearchSpace) -> Self {
        self.params = space.into_params();
        self
    }

    /// Append one parameter.
    #[must_use]
    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Replace all evolution settings.
    #[must_use]
    pub fn config(mut self, config: EvolutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the size of the Sobol initial design.
    #[must_use]
    pub fn original_num(mut self, original_num: usize) -> Self {
        self.config.original_num = original_num;
        self
    }

    /// Set the size of the parent pool.
    #[must_use]
    pub fn num_parent(mut self, num_parent: usize) -> Self {
        self.config.num_parent = num_parent;
        self
    }

    /// Set the trial id from which exploration picks among parent values.
    #[must_use]
    pub fn explorer_num(mut self, explorer_num: u64) -> Self {
        self.config.explorer_num = explorer_num;
        self
    }

    /// Set the divisor of the exploitation schedule.
    #[must_use]
    pub fn schedule_div(mut self, schedule_div: f64) -> Self {
        self.config.schedule_div = schedule_div;
        self
    }

    /// Seed the RNG used by the evolutionary phase.
    ///
    /// The same seed, search space and recorded objectives reproduce the
    /// same proposals.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the scramble seed of the Sobol design.
    #[must_use]
    pub fn sobol_seed(mut self, sobol_seed: u32) -> Self {
        self.sobol_seed = sobol_seed;
        self
    }

    /// Use `storage` as the objective history.
    ///
    /// Keep a clone of the `Arc` to record results from the driving loop.
    #[must_use]
    pub fn storage<T: ObjectiveHistory + ?Sized>(self, storage: Arc<T>) -> OptimizerBuilder<T> {
        OptimizerBuilder {
            params: self.params,
            config: self.config,
            seed: self.seed,
            sobol_seed: self.sobol_seed,
            storage,
        }
    }

    /// Build the [`Optimizer`], validating the search space and settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the search space is empty or invalid, the
    /// evolution settings are inconsistent, or the space has more
    /// dimensions than the Sobol generator supports.
    pub fn build(self) -> Result<Optimizer<S>> {
        let space = SearchSpace::new(self.params)?;
        let proposer = EvolutionaryProposer::new(self.config.clone())?;
        let sobol = SobolMatrix::with_seed(space.len(), self.config.original_num, self.sobol_seed)?;
        let rng = self.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        trace_info!(
            n_params = space.len(),
            original_num = self.config.original_num,
            num_parent = self.config.num_parent,
            "optimizer built"
        );

        Ok(Optimizer {
            space,
            proposer,
            config: self.config,
            sobol,
            cache: ProposalCache::new(),
            rng,
            storage: self.storage,
        })
    }
}
