//! Parameter specifications and the ordered search space.
//!
//! A [`ParameterSpec`] describes one tunable dimension: its name, a
//! [`ParamType`] tag, and inclusive bounds. A [`SearchSpace`] is the ordered
//! list of specs the optimizer proposes values for; the order is fixed for
//! the whole run and every candidate follows it.
//!
//! # Example
//!
//! ```
//! use sobol_evo::parameter::{ParameterSpec, SearchSpace};
//!
//! let space = SearchSpace::new(vec![
//!     ParameterSpec::float("x", -5.0, 5.0),
//!     ParameterSpec::int("layers", 1.0, 8.0),
//!     ParameterSpec::log("lr", 1e-5, 1e-1),
//! ])
//! .unwrap();
//!
//! assert_eq!(space.len(), 3);
//! ```

use core::fmt;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distribution::Scale;
use crate::error::{Error, Result};

/// Exponent floor of the synthetic log scale used for `[0, 1]` bounds.
const UNIT_LOG_FLOOR: f64 = -5.0;

/// Declared type of a parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum ParamType {
    /// A continuous value.
    Float,
    /// A whole number.
    Int,
    /// A continuous value declared as log-scaled.
    Log,
}

impl ParamType {
    /// Returns `true` if values of this type must be whole numbers.
    #[must_use]
    pub fn is_int(self) -> bool {
        matches!(self, Self::Int)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Float => "FLOAT",
            Self::Int => "INT",
            Self::Log => "LOG",
        };
        f.write_str(tag)
    }
}

/// One tunable dimension of the search space.
///
/// Bounds are inclusive. The optional initial value is only consulted for
/// parameters bounded by exactly `[0, 1]`, which are sampled on a synthetic
/// log scale anchored at `log10(initial)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterSpec {
    name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    kind: ParamType,
    lower: f64,
    upper: f64,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    initial: Option<f64>,
}

impl ParameterSpec {
    /// Creates a spec with an explicit type tag.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ParamType, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            lower,
            upper,
            initial: None,
        }
    }

    /// Creates a continuous parameter.
    #[must_use]
    pub fn float(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self::new(name, ParamType::Float, lower, upper)
    }

    /// Creates an integer parameter.
    #[must_use]
    pub fn int(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self::new(name, ParamType::Int, lower, upper)
    }

    /// Creates a log-tagged continuous parameter.
    #[must_use]
    pub fn log(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self::new(name, ParamType::Log, lower, upper)
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, initial: f64) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type tag.
    #[must_use]
    pub fn kind(&self) -> ParamType {
        self.kind
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns the initial value, if any.
    #[must_use]
    pub fn initial_value(&self) -> Option<f64> {
        self.initial
    }

    /// Returns the whole-number bounds `(ceil(lower), floor(upper))`.
    #[must_use]
    pub fn int_bounds(&self) -> (f64, f64) {
        (self.lower.ceil(), self.upper.floor())
    }

    /// Returns the mapping used to place Sobol coordinates on this parameter.
    ///
    /// Bounds of exactly `[0, 1]` use a synthetic log scale from
    /// `min(-5, log10(initial))` up to `0`. Positive bounds spanning at least
    /// two decades (`lower / upper <= 0.01`) use `log10` of the bounds.
    /// Everything else is linear.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn scale(&self) -> Scale {
        if self.lower == 0.0 && self.upper == 1.0 {
            let lower_index = self
                .initial
                .map_or(UNIT_LOG_FLOOR, |v| UNIT_LOG_FLOOR.min(v.log10()));
            Scale::Log {
                lower_index,
                upper_index: 0.0,
            }
        } else if self.lower > 0.0 && self.lower / self.upper <= 0.01 {
            Scale::Log {
                lower_index: self.lower.log10(),
                upper_index: self.upper.log10(),
            }
        } else {
            Scale::Linear {
                lower: self.lower,
                upper: self.upper,
            }
        }
    }

    /// Validates the bounds and initial value.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is not finite, `lower > upper`, an
    /// integer parameter has no whole number inside its bounds, or the
    /// initial value is not positive.
    pub fn validate(&self) -> Result<()> {
        let initial_finite = self.initial.is_none_or(f64::is_finite);
        if !self.lower.is_finite() || !self.upper.is_finite() || !initial_finite {
            return Err(Error::NonFiniteBounds {
                name: self.name.clone(),
            });
        }
        if self.lower > self.upper {
            return Err(Error::InvalidBounds {
                name: self.name.clone(),
                lower: self.lower,
                upper: self.upper,
            });
        }
        if self.kind.is_int() {
            let (lo, hi) = self.int_bounds();
            if lo > hi {
                return Err(Error::EmptyIntRange {
                    name: self.name.clone(),
                    lower: self.lower,
                    upper: self.upper,
                });
            }
        }
        if let Some(initial) = self.initial
            && initial <= 0.0
        {
            return Err(Error::InvalidInitial {
                name: self.name.clone(),
                initial,
            });
        }
        Ok(())
    }
}

/// The ordered, validated list of parameters being searched.
///
/// Construction rejects empty spaces, duplicate names, and any spec that
/// fails [`ParameterSpec::validate`], so sampling never sees a malformed
/// parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<ParameterSpec>", into = "Vec<ParameterSpec>")
)]
pub struct SearchSpace {
    params: Vec<ParameterSpec>,
}

impl SearchSpace {
    /// Creates a search space from specs in proposal order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySearchSpace`], [`Error::DuplicateName`], or the
    /// first validation error of an individual spec.
    pub fn new(params: Vec<ParameterSpec>) -> Result<Self> {
        if params.is_empty() {
            return Err(Error::EmptySearchSpace);
        }
        let mut seen = HashSet::with_capacity(params.len());
        for spec in &params {
            spec.validate()?;
            if !seen.insert(spec.name()) {
                return Err(Error::DuplicateName(spec.name().to_string()));
            }
        }
        Ok(Self { params })
    }

    /// Parses a JSON array of parameter specs.
    ///
    /// ```
    /// use sobol_evo::parameter::SearchSpace;
    ///
    /// let space = SearchSpace::from_json(
    ///     r#"[{"name": "x", "type": "FLOAT", "lower": 0.0, "upper": 10.0}]"#,
    /// )
    /// .unwrap();
    /// assert_eq!(space.len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Descriptor`] if the JSON is malformed or any spec is invalid.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Always `false`; empty spaces are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the spec at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ParameterSpec> {
        self.params.get(index)
    }

    /// Iterates over the specs in proposal order.
    pub fn iter(&self) -> core::slice::Iter<'_, ParameterSpec> {
        self.params.iter()
    }

    /// Returns the specs as a slice.
    #[must_use]
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Consumes the space, returning its specs.
    #[must_use]
    pub fn into_params(self) -> Vec<ParameterSpec> {
        self.params
    }
}

impl TryFrom<Vec<ParameterSpec>> for SearchSpace {
    type Error = Error;

    fn try_from(params: Vec<ParameterSpec>) -> Result<Self> {
        Self::new(params)
    }
}

impl From<SearchSpace> for Vec<ParameterSpec> {
    fn from(space: SearchSpace) -> Self {
        space.params
    }
}

impl<'a> IntoIterator for &'a SearchSpace {
    type Item = &'a ParameterSpec;
    type IntoIter = core::slice::Iter<'a, ParameterSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
