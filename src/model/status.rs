use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Just enough structure to model common RPG effects (damage over time,
/// heal over time, stun and slow) without pulling in a full component system.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    Dot,
    Hot,
    Stun,
    Slow,
}

/// A live status effect. Dot/Hot tick once per accumulated second;
/// `value` is damage or healing per tick, or the slow fraction for Slow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub name: String,
    pub kind: EffectKind,
    pub remaining_secs: f64,
    pub value: f64,
    #[serde(default)]
    pub tick_acc: f64,
}

impl StatusEffect {
    pub fn new(name: impl Into<String>, kind: EffectKind, duration_secs: f64, value: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            remaining_secs: duration_secs,
            value,
            tick_acc: 0.0,
        }
    }

    pub fn active(&self) -> bool {
        self.remaining_secs > 0.0
    }
}

/// Resistance values against status effect kinds, in [0, 1].
#[derive(Clone, Debug, Default)]
pub struct ResistanceTable {
    resistances: BTreeMap<EffectKind, f64>,
}

impl ResistanceTable {
    pub fn set(&mut self, kind: EffectKind, value: f64) {
        self.resistances.insert(kind, value.clamp(0.0, 1.0));
    }

    /// Subtract resistance from a base application chance, clamped to [0, 1].
    pub fn apply(&self, kind: EffectKind, base_chance: f64) -> f64 {
        let resist = self.resistances.get(&kind).copied().unwrap_or(0.0);
        (base_chance - resist).clamp(0.0, 1.0)
    }
}
