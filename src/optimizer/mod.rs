//! The optimizer: dispatch between the Sobol design and evolution.

use std::sync::Arc;

use crate::cache::ProposalCache;
use crate::error::Result;
use crate::param::CandidateVector;
use crate::parameter::SearchSpace;
use crate::sampler::{EvolutionaryProposer, SobolMatrix};
use crate::storage::{MemoryStorage, ObjectiveHistory};
use crate::types::{EvolutionConfig, Phase};

mod builder;

pub use builder::OptimizerBuilder;

/// A candidate together with the trial id it was issued for.
#[derive(Clone, Debug, PartialEq)]
pub struct Proposal {
    /// The trial id, dense from 1.
    pub trial_id: u64,
    /// The proposed parameter values.
    pub params: CandidateVector,
}

/// The best trial recorded so far.
#[derive(Clone, Debug, PartialEq)]
pub struct BestTrial {
    /// The trial id.
    pub trial_id: u64,
    /// Its objective value.
    pub objective: f64,
    /// The parameters that produced it.
    pub params: CandidateVector,
}

/// Proposes one candidate per call, learning from recorded objectives.
///
/// Trials `1..=original_num` come from a pre-generated Sobol design;
/// later trials are bred from the best recorded trials by
/// [`EvolutionaryProposer`]. Trial ids are issued densely starting at 1, and
/// every issued candidate is kept so parents' values can be read back.
///
/// The optimizer only reads objectives. The loop driving it evaluates each
/// candidate and records the result in the shared storage `S`.
///
/// # Examples
///
/// ```
/// use sobol_evo::parameter::{ParameterSpec, SearchSpace};
/// use sobol_evo::Optimizer;
///
/// let space = SearchSpace::new(vec![ParameterSpec::float("x", -10.0, 10.0)]).unwrap();
/// let mut optimizer = Optimizer::builder().space(space).seed(42).build().unwrap();
///
/// for _ in 0..30 {
///     let proposal = optimizer.generate_parameter().unwrap();
///     let x = proposal.params.value_of("x").unwrap();
///     optimizer.storage().record(proposal.trial_id, (x - 3.0).powi(2));
/// }
///
/// let best = optimizer.best().unwrap();
/// assert!(best.objective < 4.0);
/// ```
pub struct Optimizer<S: ?Sized = MemoryStorage> {
    space: SearchSpace,
    config: EvolutionConfig,
    sobol: SobolMatrix,
    proposer: EvolutionaryProposer,
    cache: ProposalCache,
    rng: fastrand::Rng,
    storage: Arc<S>,
}

impl Optimizer {
    /// Creates an optimizer over `space` with default settings and a fresh
    /// in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the space has more dimensions than the Sobol
    /// generator supports.
    pub fn new(space: SearchSpace) -> Result<Self> {
        Self::builder().space(space).build()
    }

    /// Returns an [`OptimizerBuilder`] for configuring an optimizer.
    #[must_use]
    pub fn builder() -> OptimizerBuilder {
        OptimizerBuilder::new()
    }
}

impl<S: ObjectiveHistory + ?Sized> Optimizer<S> {
    /// Proposes the candidate for the next trial.
    ///
    /// Trials within the initial budget read the Sobol design; later trials
    /// are bred from the best recorded objectives. The candidate is cached
    /// under its trial id before it is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientHistory`](crate::Error::InsufficientHistory)
    /// if an evolutionary proposal is due before `num_parent` objectives have
    /// been recorded. No trial id is consumed in that case, so the call can
    /// be repeated once more results are in.
    pub fn generate_parameter(&mut self) -> Result<Proposal> {
        let trial_id = self.cache.next_trial_id();
        let params = match self.config.phase_for(trial_id) {
            Phase::Initial => {
                trace_debug!(trial_id, "proposing from Sobol design");
                self.sobol.original_params(trial_id, &self.space)?
            }
            Phase::Evolutionary => {
                trace_debug!(trial_id, "proposing from parent pool");
                self.proposer.propose(
                    trial_id,
                    &self.space,
                    &self.cache,
                    &*self.storage,
                    &mut self.rng,
                )?
            }
        };

        self.cache.insert(trial_id, params.clone())?;
        trace_info!(trial_id, "candidate issued");
        Ok(Proposal { trial_id, params })
    }

    /// Returns the phase that handles `trial_id`.
    #[must_use]
    pub fn phase_for(&self, trial_id: u64) -> Phase {
        self.config.phase_for(trial_id)
    }

    /// Returns the candidate issued for `trial_id`.
    #[must_use]
    pub fn candidate(&self, trial_id: u64) -> Option<&CandidateVector> {
        self.cache.get(trial_id)
    }

    /// Returns the number of candidates issued so far.
    #[must_use]
    pub fn n_proposals(&self) -> usize {
        self.cache.len()
    }

    /// Returns the issued trial with the lowest recorded objective.
    ///
    /// Trials the storage knows about but this optimizer never issued are
    /// ignored. Returns `None` if no issued trial has a resolved objective.
    #[must_use]
    pub fn best(&self) -> Option<BestTrial> {
        self.storage
            .trial_ids()?
            .into_iter()
            .filter_map(|id| {
                let objective = self.storage.objective(id)?;
                let params = self.cache.get(id)?;
                Some((id, objective, params))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(trial_id, objective, params)| BestTrial {
                trial_id,
                objective,
                params: params.clone(),
            })
    }

    /// Returns the search space.
    #[must_use]
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// Returns the evolution settings.
    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Returns the proposal cache.
    #[must_use]
    pub fn cache(&self) -> &ProposalCache {
        &self.cache
    }

    /// Returns the objective store.
    #[must_use]
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}
