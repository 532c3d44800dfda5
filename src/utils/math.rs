//! Numeric helpers for report figures
//!
//! Figures shown on the dashboard carry a fixed number of decimals; these
//! helpers keep that rounding in one place.

/// Round `value` to `decimals` decimal places.
///
/// # Examples
/// ```
/// use outage_dashboard::utils::math::round_to;
///
/// assert_eq!(round_to(3.14159, 2), 3.14);
/// assert_eq!(round_to(2.5, 0), 3.0);
/// ```
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to two decimal places (hours precision used throughout the dashboard)
#[inline]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Average duration per outage, rounded to two decimals, 0.0 when `count` is zero.
///
/// # Examples
/// ```
/// use outage_dashboard::utils::math::safe_average;
///
/// assert_eq!(safe_average(7.0, 3), 2.33);
/// assert_eq!(safe_average(5.0, 0), 0.0);  // Zero-division guard
/// ```
#[inline]
pub fn safe_average(total: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        round2(total / count as f64)
    }
}

/// Clamp a figure to a finite, non-negative value
#[inline]
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
