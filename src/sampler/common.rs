//! Value clean-up shared by both proposal phases.

use crate::parameter::ParameterSpec;

/// Round to the nearest whole number, ties away from zero.
#[inline]
pub(crate) fn round_half_up(value: f64) -> f64 {
    value.round()
}

/// Round and clamp `value` into the whole numbers inside `spec`'s bounds.
pub(crate) fn to_int_range(value: f64, spec: &ParameterSpec) -> f64 {
    let (lo, hi) = spec.int_bounds();
    round_half_up(value).clamp(lo, hi)
}

/// Bring a proposed value back inside `spec`'s domain.
///
/// `INT` parameters are rounded onto the integer grid, everything else is
/// clamped to `[lower, upper]`.
pub(crate) fn finalize(value: f64, spec: &ParameterSpec) -> f64 {
    if spec.kind().is_int() {
        to_int_range(value, spec)
    } else {
        value.clamp(spec.lower(), spec.upper())
    }
}
