/// Drop probability helpers for loot tables and rate displays.

/// P(at least one success) across n independent trials with probability p each.
#[inline]
pub fn at_least_one(p: f64, n: u32) -> f64 {
    if p <= 0.0 || n == 0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    1.0 - (1.0 - p).powi(n as i32)
}

/// Expected number of successes across n trials with probability p each.
#[inline]
pub fn expected_successes(p: f64, n: u32) -> f64 {
    if p <= 0.0 || n == 0 {
        return 0.0;
    }
    if p >= 1.0 {
        return n as f64;
    }
    p * n as f64
}

/// Convert "1 in X" odds (e.g. X=128) to probability p.
#[inline]
pub fn one_in_to_prob(x: u32) -> f64 {
    if x <= 1 {
        return 1.0;
    }
    1.0 / x as f64
}
