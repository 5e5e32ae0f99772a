/// Damage pipeline and attack timing, kept pure so tests can pin rolls
/// with a seeded RNG.
use std::cell::RefCell;

use bevy_prng::WyRand;

use crate::rules::rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRoll {
    pub amount: i32,
    pub crit: bool,
}

/// Seconds between attacks for a speed stat in 0..1; slows multiply the
/// interval. Fastest possible swing is 0.6 s.
#[inline]
pub fn attack_interval(speed: f64, slow_mult: f64) -> f64 {
    (2.5 - speed.clamp(0.0, 1.0) * 2.5).max(0.6) * slow_mult
}

/// One attack roll: base damage reduced by 60% of defense, jittered by
/// 0.85..1.15, with a crit multiplying by at least 1.25. Never below 1.
pub fn damage_roll(
    rng: &RefCell<WyRand>,
    attack: i32,
    defense: i32,
    crit_chance: f64,
    crit_multiplier: f64,
) -> DamageRoll {
    let base = (attack - (defense as f64 * 0.6) as i32).max(1);
    let mut roll = (base as f64 * rng::damage_jitter(rng)).round() as i32;
    let crit = rng::chance(rng, crit_chance);
    if crit {
        roll = (roll as f64 * crit_multiplier.max(1.25)).round() as i32;
    }
    DamageRoll {
        amount: roll.max(1),
        crit,
    }
}

/// Scale damage by an elemental modifier; a landed hit always deals at least 1.
#[inline]
pub fn apply_element(damage: i32, modifier: f64) -> i32 {
    ((damage as f64 * modifier).round() as i32).max(1)
}

/// Attack cooldown after gear, potion, and buff speed bonuses. Floors at 0.1 s.
#[inline]
pub fn cooldown(base_secs: f64, gear_speed: f64, potion_bonus: f64, buff_bonus: f64) -> f64 {
    (base_secs * (1.0 - gear_speed - potion_bonus - buff_bonus)).max(0.1)
}

#[inline]
pub fn cooldown_ready(last_attack_at_ms: u64, now_ms: u64, cooldown_ms: u64) -> bool {
    now_ms.saturating_sub(last_attack_at_ms) >= cooldown_ms
}
