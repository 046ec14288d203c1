//! Safe-ratio policy for all percentage computations
//!
//! A zero denominator yields 0 by policy, never an error or a non-finite
//! value. Zero previous periods and zero revenue are normal in this domain
//! (seasonal categories are legitimately empty), so every ratio in the crate
//! goes through these helpers instead of guarding at the call site.

/// `numerator / denominator`, or 0 when the denominator is 0
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Percentage change from `previous` to `current`; 0 when `previous` is 0
pub fn change_percent(current: f64, previous: f64) -> f64 {
    safe_ratio(current - previous, previous) * 100.0
}

/// `part` as a percentage of `whole`; 0 when `whole` is 0
pub fn share_percent(part: f64, whole: f64) -> f64 {
    safe_ratio(part, whole) * 100.0
}
