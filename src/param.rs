//! Proposed parameter values.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::parameter::{ParamType, ParameterSpec};

/// One proposed value, tagged with the parameter it belongs to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamEntry {
    /// The parameter name.
    #[cfg_attr(feature = "serde", serde(rename = "parameter_name"))]
    pub name: String,
    /// The parameter's declared type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ParamType,
    /// The proposed value, within the parameter's bounds.
    pub value: f64,
}

impl ParamEntry {
    /// Creates an entry for `spec` holding `value`.
    #[must_use]
    pub fn new(spec: &ParameterSpec, value: f64) -> Self {
        Self {
            name: spec.name().to_string(),
            kind: spec.kind(),
            value,
        }
    }

    /// Returns the value as an integer for `INT` parameters.
    ///
    /// Values on a log scale are not snapped to whole numbers when proposed,
    /// so the value is rounded half away from zero here.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i64(&self) -> Option<i64> {
        self.kind.is_int().then(|| self.value.round() as i64)
    }
}

/// A full candidate: one entry per parameter, in search-space order.
///
/// Candidates are never mutated once produced; the optimizer keeps a copy
/// in its proposal cache and hands another to the caller.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CandidateVector {
    entries: Vec<ParamEntry>,
}

impl CandidateVector {
    /// Creates a candidate from entries already in search-space order.
    #[must_use]
    pub fn new(entries: Vec<ParamEntry>) -> Self {
        Self { entries }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the candidate has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at dimension `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ParamEntry> {
        self.entries.get(index)
    }

    /// Returns the value proposed for the parameter called `name`.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value)
    }

    /// Returns the values in search-space order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Iterates over the entries in search-space order.
    pub fn iter(&self) -> core::slice::Iter<'_, ParamEntry> {
        self.entries.iter()
    }

    /// Returns the entries as a slice.
    #[must_use]
    pub fn entries(&self) -> &[ParamEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a CandidateVector {
    type Item = &'a ParamEntry;
    type IntoIter = core::slice::Iter<'a, ParamEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for CandidateVector {
    type Item = ParamEntry;
    type IntoIter = std::vec::IntoIter<ParamEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
