use serde::{Deserialize, Serialize};

/// Combat stats shared by players, monsters, and equipment.
/// `speed` is a 0..1 contribution (positive speeds attacks up).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub attack: i32,
    pub defense: i32,
    pub speed: f64,
    pub health: i32,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
}

impl Stats {
    pub fn new(
        attack: i32,
        defense: i32,
        speed: f64,
        health: i32,
        crit_chance: f64,
        crit_multiplier: f64,
    ) -> Self {
        Self {
            attack,
            defense,
            speed,
            health,
            crit_chance,
            crit_multiplier,
        }
    }

    /// Pure sum; crit multiplier takes the larger of the two.
    pub fn combine(a: &Stats, b: &Stats) -> Stats {
        Stats {
            attack: a.attack + b.attack,
            defense: a.defense + b.defense,
            speed: a.speed + b.speed,
            health: a.health + b.health,
            crit_chance: a.crit_chance + b.crit_chance,
            crit_multiplier: a.crit_multiplier.max(b.crit_multiplier),
        }
    }
}
