/// Randomness helpers shared by combat, loot, and slayer rolls.
/// Note: uses `bevy_prng::WyRand` with `RefCell<>` so callers
/// can keep closures `Fn` while mutating RNG state.
use bevy_prng::WyRand;
use rand_core::RngCore;
use std::cell::RefCell;

/// Uniform f64 in [0, 1) from the top 53 bits of a u64.
#[inline]
pub fn u01(rng: &RefCell<WyRand>) -> f64 {
    let mut r = rng.borrow_mut();
    ((r.next_u64() >> 11) as f64) / ((1u64 << 53) as f64)
}

/// Bernoulli(p), clamped to [0, 1].
#[inline]
pub fn chance(rng: &RefCell<WyRand>, p: f64) -> bool {
    u01(rng) < p.clamp(0.0, 1.0)
}

/// Uniform integer in `lo..=hi`; a reversed range collapses to `lo`.
#[inline]
pub fn range_inclusive(rng: &RefCell<WyRand>, lo: i64, hi: i64) -> i64 {
    if hi <= lo {
        return lo;
    }
    let span = (hi - lo + 1) as u64;
    let mut r = rng.borrow_mut();
    lo + (r.next_u64() % span) as i64
}

/// Uniform pick from a slice (None when empty).
#[inline]
pub fn pick<'a, T>(rng: &RefCell<WyRand>, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let mut r = rng.borrow_mut();
    let idx = (r.next_u64() % items.len() as u64) as usize;
    items.get(idx)
}

/// Multiplicative damage jitter in [0.85, 1.15).
#[inline]
pub fn damage_jitter(rng: &RefCell<WyRand>) -> f64 {
    0.85 + u01(rng) * 0.30
}
