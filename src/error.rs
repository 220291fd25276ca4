#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the lower bound is greater than the upper bound.
    #[error(
        "invalid bounds for '{name}': lower ({lower}) must be less than or equal to upper ({upper})"
    )]
    InvalidBounds {
        /// The name of the offending parameter.
        name: String,
        /// The lower bound value.
        lower: f64,
        /// The upper bound value.
        upper: f64,
    },

    /// Returned when a bound or initial value is NaN or infinite.
    #[error("non-finite bound for '{name}'")]
    NonFiniteBounds {
        /// The name of the offending parameter.
        name: String,
    },

    /// Returned when an integer parameter has no whole number inside its bounds.
    #[error("empty integer range for '{name}': no integer lies in [{lower}, {upper}]")]
    EmptyIntRange {
        /// The name of the offending parameter.
        name: String,
        /// The lower bound value.
        lower: f64,
        /// The upper bound value.
        upper: f64,
    },

    /// Returned when the initial value anchoring a synthetic log scale is not positive.
    #[error("invalid initial value for '{name}': {initial} must be positive")]
    InvalidInitial {
        /// The name of the offending parameter.
        name: String,
        /// The rejected initial value.
        initial: f64,
    },

    /// Returned when two parameters share a name.
    #[error("duplicate parameter name '{0}'")]
    DuplicateName(String),

    /// Returned when a search space contains no parameters.
    #[error("search space must contain at least one parameter")]
    EmptySearchSpace,

    /// Returned when the search space has more dimensions than the Sobol generator supports.
    #[error("too many dimensions: {got} exceeds the supported maximum of {max}")]
    TooManyDimensions {
        /// The requested number of dimensions.
        got: usize,
        /// The maximum number of dimensions supported.
        max: usize,
    },

    /// Returned when evolution settings are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Returned when the initial design is asked for a trial it does not cover.
    #[error("trial id {trial_id} is outside the initial sample range [1, {sample_count}]")]
    TrialOutOfRange {
        /// The requested trial id.
        trial_id: u64,
        /// The number of pre-generated samples.
        sample_count: usize,
    },

    /// Returned when a trial id would leave a gap in the dense id sequence.
    #[error("trial id {got} breaks the dense id sequence: expected {expected}")]
    NonContiguousTrialId {
        /// The id the cache expected next.
        expected: u64,
        /// The id that was supplied.
        got: u64,
    },

    /// Returned when an evolutionary proposal is requested before enough
    /// objectives have been recorded to fill the parent pool.
    #[error("insufficient history: {required} resolved objectives required, {available} available")]
    InsufficientHistory {
        /// The size of the parent pool.
        required: usize,
        /// The number of trials with a resolved objective.
        available: usize,
    },

    /// Returned when a candidate vector does not line up with the search space.
    #[error("dimension mismatch: expected {expected} parameters, got {got}")]
    DimensionMismatch {
        /// The number of parameters in the search space.
        expected: usize,
        /// The number of parameters supplied.
        got: usize,
    },

    /// Returned when an internal invariant is violated.
    #[error("internal error: {0}")]
    Internal(&'static str),

    /// Returned when a parameter-space descriptor cannot be parsed.
    #[cfg(feature = "serde")]
    #[error("invalid search space descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
