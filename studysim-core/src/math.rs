//! Division helpers shared by every allocation policy.

/// `numerator / denominator`, or 0 when the denominator is not positive.
///
/// A zero round time, priority sum or target must never turn into NaN or
/// infinity in the results.
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Hours a strategy may hand out: negative and non-finite budgets become 0.
pub fn usable_budget(total_hours: f64) -> f64 {
    if total_hours.is_finite() && total_hours > 0.0 {
        total_hours
    } else {
        0.0
    }
}

/// Percentage of the target reached; 0 when there is no target.
pub fn achievement_rate(rounds: f64, target_rounds: u32) -> f64 {
    safe_divide(rounds, f64::from(target_rounds)) * 100.0
}
