//! Grade computation. A mark is stored with the letter grade derived from the
//! owning exam's maximum at the time it was recorded.

/// Percentage of `max` represented by `obtained`. A zero (or negative) max
/// yields 0 rather than a division fault.
pub fn percentage(obtained: f64, max: f64) -> f64 {
    if max > 0.0 {
        100.0 * obtained / max
    } else {
        0.0
    }
}

/// Letter grade by inclusive lower bound, highest band first.
pub fn letter_grade(obtained: f64, max: f64) -> &'static str {
    let pct = percentage(obtained, max);
    if pct >= 90.0 {
        "A+"
    } else if pct >= 80.0 {
        "A"
    } else if pct >= 70.0 {
        "B+"
    } else if pct >= 60.0 {
        "B"
    } else if pct >= 50.0 {
        "C+"
    } else if pct >= 40.0 {
        "C"
    } else if pct >= 30.0 {
        "D"
    } else {
        "F"
    }
}
