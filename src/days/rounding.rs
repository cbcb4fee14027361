//! Half-up rounding as shown to users. Inputs are calorie sums, so never negative.

/// Rounds to one decimal place, ties away from zero: `trunc(x * 10 + 0.5) / 10`.
pub fn round_half_up_01(x: f64) -> f64 {
    (x * 10.0 + 0.5).trunc() / 10.0
}

/// Rounds to the nearest whole number, ties away from zero.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).trunc() as i64
}
