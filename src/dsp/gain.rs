//! Gain conversions between dBFS and linear multipliers.

/// Convert dBFS to a linear multiplier: `10^(db / 20)`.
///
/// Total over all inputs; `-inf` yields exactly `0.0`.
pub fn dbfs_to_linear(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Inverse of [`dbfs_to_linear`]. Silence maps to `-inf`.
pub fn linear_to_dbfs(linear: f64) -> f64 {
    20.0 * linear.log10()
}
