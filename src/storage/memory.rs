use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::ObjectiveHistory;

/// In-memory objective history (the default).
///
/// Keeps a map from trial id to its objective, where `None` marks a trial
/// that has been registered but not evaluated yet.
pub struct MemoryStorage {
    trials: RwLock<BTreeMap<u64, Option<f64>>>,
}

impl MemoryStorage {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trials: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates a store pre-populated with `(trial_id, objective)` pairs.
    #[must_use]
    pub fn with_objectives(objectives: impl IntoIterator<Item = (u64, f64)>) -> Self {
        let trials = objectives
            .into_iter()
            .map(|(id, value)| (id, Some(value)))
            .collect();
        Self {
            trials: RwLock::new(trials),
        }
    }

    /// Marks `trial_id` as issued but not yet evaluated.
    ///
    /// Does nothing if the trial is already known.
    pub fn register(&self, trial_id: u64) {
        self.trials.write().entry(trial_id).or_insert(None);
    }

    /// Records the objective of `trial_id`, replacing any earlier value.
    pub fn record(&self, trial_id: u64, objective: f64) {
        self.trials.write().insert(trial_id, Some(objective));
    }

    /// Returns the number of trials with a resolved objective.
    #[must_use]
    pub fn n_resolved(&self) -> usize {
        self.trials.read().values().filter(|v| v.is_some()).count()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectiveHistory for MemoryStorage {
    fn trial_ids(&self) -> Option<Vec<u64>> {
        let trials = self.trials.read();
        if trials.is_empty() {
            None
        } else {
            Some(trials.keys().copied().collect())
        }
    }

    fn objective(&self, trial_id: u64) -> Option<f64> {
        self.trials.read().get(&trial_id).copied().flatten()
    }
}
