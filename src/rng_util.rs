/// Generate a random `f64` in the range `[low, high)`.
#[inline]
pub(crate) fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Sample a value from the standard normal distribution using Box-Muller transform.
pub(crate) fn standard_normal(rng: &mut fastrand::Rng) -> f64 {
    // 1 - U keeps u1 in (0, 1] so the log stays finite.
    let u1 = 1.0 - rng.f64();
    let u2 = rng.f64();
    (-2.0 * u1.ln()).sqrt() * (core::f64::consts::TAU * u2).cos()
}

/// Sample from `N(mean, std_dev^2)`.
#[inline]
pub(crate) fn normal(rng: &mut fastrand::Rng, mean: f64, std_dev: f64) -> f64 {
    mean + std_dev * standard_normal(rng)
}

/// Draw an index with probability proportional to `weights`.
///
/// Falls back to the last index if rounding leaves the cumulative sum
/// short of the draw.
pub(crate) fn weighted_index(rng: &mut fastrand::Rng, weights: &[f64]) -> usize {
    let total: f64 = weights.iter().sum();
    let target = rng.f64() * total;
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if target < cumulative {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}
