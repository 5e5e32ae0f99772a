use serde::{Deserialize, Serialize};

/// Interval accumulator used by offline catch-up: every `interval_ms` of
/// elapsed time awards one tick of XP and currency.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub interval_ms: u64,
    pub progress_ms: u64,
    pub xp_per_tick: u32,
    pub currency_per_tick: u32,
    pub accumulated_xp: u64,
    pub accumulated_currency: u64,
}
