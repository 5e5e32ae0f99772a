//! Encounter lifecycle on the facade: start a fight, feed it wall-clock
//! ticks, and settle rewards when it ends.

use thiserror::Error;

use crate::engine::combat::{CombatEvent, Encounter, Outcome};
use crate::game::Game;
use crate::model::StatusEffect;
use crate::rules::rng;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CombatError {
    #[error("unknown monster `{0}`")]
    UnknownMonster(String),
    #[error("an encounter is already running")]
    AlreadyFighting,
}

impl Game {
    pub fn start_encounter(&mut self, monster_id: &str, now_ms: u64) -> Result<(), CombatError> {
        if self.encounter.as_ref().is_some_and(Encounter::running) {
            return Err(CombatError::AlreadyFighting);
        }
        let monster = self
            .content
            .monster(monster_id)
            .cloned()
            .ok_or_else(|| CombatError::UnknownMonster(monster_id.to_string()))?;

        let stats = self.total_stats();
        let encounter = Encounter::new(
            stats,
            self.player.element,
            self.player.current_hp,
            monster,
        );
        log::debug!("encounter started against {monster_id}");
        self.encounter = Some(encounter);
        self.last_combat_ms = now_ms;
        Ok(())
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn battle_active(&self) -> bool {
        self.encounter.as_ref().is_some_and(Encounter::running)
    }

    /// Advance the live encounter to `now_ms`. On a kill this settles
    /// rewards: XP to the training skill, silver and drops into pending
    /// loot, and the slayer task if it matches.
    pub fn combat_tick(&mut self, now_ms: u64) -> Vec<CombatEvent> {
        let dt = now_ms.saturating_sub(self.last_combat_ms) as f64 / 1000.0;
        self.last_combat_ms = now_ms;

        let Some(encounter) = self.encounter.as_mut() else {
            return Vec::new();
        };
        if !encounter.running() {
            return Vec::new();
        }

        let events = encounter.advance(&self.rng, dt);
        let settled = if encounter.running() {
            None
        } else {
            Some((
                encounter.carried_player_hp(),
                encounter.outcome(),
                encounter.monster().clone(),
            ))
        };

        if let Some((hp, outcome, monster)) = settled {
            self.player.current_hp = Some(hp);
            if outcome == Some(Outcome::Victory) {
                self.grant_victory_rewards(&monster, now_ms);
            }
        }
        events
    }

    /// End the fight early, writing the player's HP back (even at 0).
    pub fn stop_encounter(&mut self) {
        if let Some(encounter) = self.encounter.take() {
            self.player.current_hp = Some(encounter.carried_player_hp());
        }
    }

    /// Try to put an effect on the player; the resistance table reduces the
    /// application chance. Returns whether it stuck.
    pub fn apply_player_effect(&mut self, effect: StatusEffect, base_chance: f64) -> bool {
        let chance = self.resistances.apply(effect.kind, base_chance);
        if !rng::chance(&self.rng, chance) {
            return false;
        }
        match self.encounter.as_mut() {
            Some(encounter) if encounter.running() => {
                encounter.add_player_effect(effect);
                true
            }
            _ => false,
        }
    }

    /// Put an effect on the monster with a flat application chance.
    pub fn apply_monster_effect(&mut self, effect: StatusEffect, chance: f64) -> bool {
        if !rng::chance(&self.rng, chance) {
            return false;
        }
        match self.encounter.as_mut() {
            Some(encounter) if encounter.running() => {
                encounter.add_monster_effect(effect);
                true
            }
            _ => false,
        }
    }
}
