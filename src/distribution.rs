//! How a unit coordinate is stretched over a parameter's bounds.

/// Mapping from a point in \[0, 1) onto a parameter's native range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scale {
    /// `lower + (upper - lower) * u`.
    Linear {
        /// Lower bound (inclusive).
        lower: f64,
        /// Upper bound (inclusive).
        upper: f64,
    },
    /// `10^(lower_index + (upper_index - lower_index) * u)`.
    Log {
        /// Base-10 exponent at `u = 0`.
        lower_index: f64,
        /// Base-10 exponent at `u = 1`.
        upper_index: f64,
    },
}

impl Scale {
    /// Maps `u` in \[0, 1) onto this scale.
    #[must_use]
    pub fn apply(&self, u: f64) -> f64 {
        match *self {
            Self::Linear { lower, upper } => lower + (upper - lower) * u,
            Self::Log {
                lower_index,
                upper_index,
            } => 10_f64.powf(lower_index + (upper_index - lower_index) * u),
        }
    }

    /// Returns `true` for the logarithmic mapping.
    #[must_use]
    pub fn is_log(&self) -> bool {
        matches!(self, Self::Log { .. })
    }
}
