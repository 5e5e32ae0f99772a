use serde::{Deserialize, Serialize};

use crate::model::{Drop, Stats};

/// Basic elemental types for combat interactions.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Element {
    #[default]
    Neutral,
    Fire,
    Water,
    Air,
    Earth,
}

/// AI behavior modes: aggressive monsters attack, passive ones never initiate.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiBehavior {
    #[default]
    Aggressive,
    Passive,
}

/// Monster definition parsed from a content pack.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Monster {
    pub id: String,
    pub name: String,
    pub stats: Stats,
    pub element: Element,
    pub behavior: AiBehavior,
    pub drops: Vec<Drop>,
    /// XP per kill (`exp_reward` is a legacy alias in old packs).
    #[serde(alias = "exp_reward")]
    pub exp: u32,
    pub silver_reward: u32,
    /// Only granted while a matching slayer task is active.
    pub slayer_reward: u32,
}

impl Monster {
    /// Ensure sane defaults after deserialization.
    pub fn normalize(&mut self) {
        if self.name.is_empty() {
            self.name = self.id.clone();
        }
    }

    pub fn exp_per_kill(&self) -> u32 {
        self.exp
    }

    pub fn has_drops(&self) -> bool {
        !self.drops.is_empty()
    }
}
