//! Auto-battle encounter. The caller owns time: every `advance(rng, dt)`
//! accumulates attack timers, resolves swings through the damage pipeline,
//! ticks status effects, and reports what happened as events. Player swings
//! resolve before monster swings, so trading final blows favors the player.

use std::cell::RefCell;
use std::collections::VecDeque;

use bevy_prng::WyRand;

use crate::engine::{combat_math, elements};
use crate::model::{AiBehavior, EffectKind, Element, Monster, Stats, StatusEffect};
use crate::rules::rng;

const LOG_CAP: usize = 50;

// Burn rider on player hits.
const BURN_APPLY_CHANCE: f64 = 0.25;
const BURN_DURATION_SECS: f64 = 5.0;
const BURN_DAMAGE_PER_TICK: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CombatEvent {
    PlayerHit { amount: i32, crit: bool },
    MonsterHit { amount: i32, crit: bool },
    EffectApplied { on_player: bool, name: String },
    EffectTicked { on_player: bool, name: String, amount: i32, heal: bool },
    EffectExpired { on_player: bool, name: String },
    Ended(Outcome),
}

/// Point-in-time view of an encounter for display layers.
#[derive(Clone, Debug)]
pub struct BattleSnapshot {
    pub monster_id: String,
    pub monster_name: String,
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub monster_hp: i32,
    pub monster_max_hp: i32,
    /// 0..1 progress toward the next attack.
    pub player_attack_progress: f64,
    pub monster_attack_progress: f64,
    /// Current attack intervals (seconds).
    pub player_attack_interval: f64,
    pub monster_attack_interval: f64,
    pub player_effects: Vec<StatusEffect>,
    pub monster_effects: Vec<StatusEffect>,
    pub running: bool,
}

pub struct Encounter {
    monster: Monster,
    player_stats: Stats,
    player_element: Element,
    player_hp: i32,
    player_max_hp: i32,
    monster_hp: i32,
    monster_max_hp: i32,
    p_timer: f64,
    m_timer: f64,
    p_interval: f64,
    m_interval: f64,
    player_effects: Vec<StatusEffect>,
    monster_effects: Vec<StatusEffect>,
    log: VecDeque<String>,
    outcome: Option<Outcome>,
}

impl Encounter {
    /// Player HP carries in from persistent state; a downed or missing value
    /// starts the fight at full health. The monster always starts full.
    pub fn new(
        player_stats: Stats,
        player_element: Element,
        carried_hp: Option<i32>,
        monster: Monster,
    ) -> Self {
        let player_max_hp = player_stats.health.max(1);
        let monster_max_hp = monster.stats.health.max(1);
        let mut player_hp = carried_hp.unwrap_or(player_max_hp).min(player_max_hp);
        if player_hp <= 0 {
            player_hp = player_max_hp;
        }

        let mut encounter = Self {
            monster,
            player_stats,
            player_element,
            player_hp,
            player_max_hp,
            monster_hp: monster_max_hp,
            monster_max_hp,
            p_timer: 0.0,
            m_timer: 0.0,
            p_interval: combat_math::attack_interval(player_stats.speed, 1.0),
            m_interval: 2.5,
            player_effects: Vec::new(),
            monster_effects: Vec::new(),
            log: VecDeque::new(),
            outcome: None,
        };
        encounter.m_interval =
            combat_math::attack_interval(encounter.monster.stats.speed, 1.0);
        let opener = format!("Encounter started: {}", encounter.monster.name);
        push_log(&mut encounter.log, opener);
        encounter
    }

    /// Advance the fight by `dt_secs`. Returns the events of this slice of
    /// time, ending with `Ended` exactly once per encounter.
    pub fn advance(&mut self, rng_cell: &RefCell<WyRand>, dt_secs: f64) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if self.outcome.is_some() {
            return events;
        }
        let dt = dt_secs.max(0.0);

        let p_slow = 1.0 + total_slow(&self.player_effects);
        let m_slow = 1.0 + total_slow(&self.monster_effects);
        let p_stunned = has_stun(&self.player_effects);
        let m_stunned = has_stun(&self.monster_effects);
        let monster_attacks = self.monster.behavior != AiBehavior::Passive;

        // Recomputed every advance so slows and stuns apply immediately.
        self.p_interval = combat_math::attack_interval(self.player_stats.speed, p_slow);
        self.m_interval = combat_math::attack_interval(self.monster.stats.speed, m_slow);

        if p_stunned {
            self.p_timer = 0.0;
        } else {
            self.p_timer += dt;
        }
        if m_stunned || !monster_attacks {
            self.m_timer = 0.0;
        } else {
            self.m_timer += dt;
        }

        // Player swings resolve first.
        while self.p_timer >= self.p_interval && self.monster_hp > 0 && self.player_hp > 0 {
            self.p_timer -= self.p_interval;
            let roll = combat_math::damage_roll(
                rng_cell,
                self.player_stats.attack,
                self.monster.stats.defense,
                self.player_stats.crit_chance,
                self.player_stats.crit_multiplier,
            );
            let modifier = elements::modifier(self.player_element, self.monster.element);
            let dealt = combat_math::apply_element(roll.amount, modifier);
            self.monster_hp = (self.monster_hp - dealt).max(0);
            push_log(
                &mut self.log,
                format!(
                    "You hit {} for {}{}",
                    self.monster.name,
                    dealt,
                    if roll.crit { " (crit)" } else { "" }
                ),
            );
            events.push(CombatEvent::PlayerHit {
                amount: dealt,
                crit: roll.crit,
            });

            if rng::chance(rng_cell, BURN_APPLY_CHANCE) {
                self.monster_effects.push(StatusEffect::new(
                    "Burn",
                    EffectKind::Dot,
                    BURN_DURATION_SECS,
                    BURN_DAMAGE_PER_TICK,
                ));
                push_log(
                    &mut self.log,
                    format!("Burn applied to {}", self.monster.name),
                );
                events.push(CombatEvent::EffectApplied {
                    on_player: false,
                    name: "Burn".to_string(),
                });
            }
            if self.monster_hp == 0 {
                break;
            }
        }

        tick_effects(
            &mut self.monster_effects,
            &mut self.monster_hp,
            self.monster_max_hp,
            false,
            &self.monster.name,
            dt,
            &mut events,
            &mut self.log,
        );
        tick_effects(
            &mut self.player_effects,
            &mut self.player_hp,
            self.player_max_hp,
            true,
            &self.monster.name,
            dt,
            &mut events,
            &mut self.log,
        );

        if monster_attacks && self.monster_hp > 0 && self.player_hp > 0 {
            while self.m_timer >= self.m_interval && self.player_hp > 0 && self.monster_hp > 0 {
                self.m_timer -= self.m_interval;
                let roll = combat_math::damage_roll(
                    rng_cell,
                    self.monster.stats.attack,
                    self.player_stats.defense,
                    self.monster.stats.crit_chance,
                    self.monster.stats.crit_multiplier,
                );
                let modifier = elements::modifier(self.monster.element, self.player_element);
                let dealt = combat_math::apply_element(roll.amount, modifier);
                self.player_hp = (self.player_hp - dealt).max(0);
                push_log(
                    &mut self.log,
                    format!(
                        "{} hits you for {}{}",
                        self.monster.name,
                        dealt,
                        if roll.crit { " (crit)" } else { "" }
                    ),
                );
                events.push(CombatEvent::MonsterHit {
                    amount: dealt,
                    crit: roll.crit,
                });
            }
        }

        if self.monster_hp == 0 || self.player_hp == 0 {
            let outcome = if self.monster_hp == 0 {
                Outcome::Victory
            } else {
                Outcome::Defeat
            };
            self.outcome = Some(outcome);
            let line = match outcome {
                Outcome::Victory => format!("You defeated {}!", self.monster.name),
                Outcome::Defeat => format!("You were defeated by {}...", self.monster.name),
            };
            push_log(&mut self.log, line);
            events.push(CombatEvent::Ended(outcome));
        }

        events
    }

    pub fn running(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    /// Player HP to write back into persistent state when the fight ends.
    pub fn carried_player_hp(&self) -> i32 {
        self.player_hp
    }

    pub fn add_player_effect(&mut self, effect: StatusEffect) {
        push_log(&mut self.log, format!("You are affected by {}.", effect.name));
        self.player_effects.push(effect);
    }

    pub fn add_monster_effect(&mut self, effect: StatusEffect) {
        push_log(
            &mut self.log,
            format!("{} is affected by {}.", self.monster.name, effect.name),
        );
        self.monster_effects.push(effect);
    }

    pub fn player_effects(&self) -> &[StatusEffect] {
        &self.player_effects
    }

    pub fn monster_effects(&self) -> &[StatusEffect] {
        &self.monster_effects
    }

    pub fn clear_effects(&mut self) {
        self.player_effects.clear();
        self.monster_effects.clear();
    }

    /// Newest-first combat log, capped at 50 lines.
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            monster_id: self.monster.id.clone(),
            monster_name: self.monster.name.clone(),
            player_hp: self.player_hp,
            player_max_hp: self.player_max_hp,
            monster_hp: self.monster_hp,
            monster_max_hp: self.monster_max_hp,
            player_attack_progress: (self.p_timer / self.p_interval.max(0.1)).min(1.0),
            monster_attack_progress: (self.m_timer / self.m_interval.max(0.1)).min(1.0),
            player_attack_interval: self.p_interval,
            monster_attack_interval: self.m_interval,
            player_effects: self.player_effects.clone(),
            monster_effects: self.monster_effects.clone(),
            running: self.outcome.is_none(),
        }
    }
}

fn total_slow(effects: &[StatusEffect]) -> f64 {
    effects
        .iter()
        .filter(|e| e.kind == EffectKind::Slow && e.active())
        .map(|e| e.value)
        .sum()
}

fn has_stun(effects: &[StatusEffect]) -> bool {
    effects
        .iter()
        .any(|e| e.kind == EffectKind::Stun && e.active())
}

fn push_log(log: &mut VecDeque<String>, line: String) {
    log.push_front(line);
    log.truncate(LOG_CAP);
}

#[allow(clippy::too_many_arguments)]
fn tick_effects(
    effects: &mut Vec<StatusEffect>,
    hp: &mut i32,
    max_hp: i32,
    on_player: bool,
    monster_name: &str,
    dt: f64,
    events: &mut Vec<CombatEvent>,
    log: &mut VecDeque<String>,
) {
    let mut i = 0;
    while i < effects.len() {
        let effect = &mut effects[i];
        effect.remaining_secs -= dt;

        if matches!(effect.kind, EffectKind::Dot | EffectKind::Hot) {
            effect.tick_acc += dt;
            // One tick per whole accumulated second while the effect lives.
            while effect.tick_acc >= 1.0 && effect.remaining_secs > 0.0 {
                effect.tick_acc -= 1.0;
                let amount = effect.value.round() as i32;
                if amount == 0 {
                    continue;
                }
                if effect.kind == EffectKind::Dot {
                    if *hp == 0 {
                        continue;
                    }
                    *hp = (*hp - amount).max(0);
                    let line = if on_player {
                        format!("You take {} {} damage.", amount, effect.name)
                    } else {
                        format!("{} takes {} {} damage.", monster_name, amount, effect.name)
                    };
                    push_log(log, line);
                    events.push(CombatEvent::EffectTicked {
                        on_player,
                        name: effect.name.clone(),
                        amount,
                        heal: false,
                    });
                } else {
                    *hp = (*hp + amount).min(max_hp);
                    let line = if on_player {
                        format!("You heal {} from {}.", amount, effect.name)
                    } else {
                        format!("{} heals {} from {}.", monster_name, amount, effect.name)
                    };
                    push_log(log, line);
                    events.push(CombatEvent::EffectTicked {
                        on_player,
                        name: effect.name.clone(),
                        amount,
                        heal: true,
                    });
                }
            }
        }

        if effect.remaining_secs <= 0.0 {
            let name = effect.name.clone();
            let line = if on_player {
                format!("Your {name} effect wore off.")
            } else {
                format!("{monster_name}'s {name} effect wore off.")
            };
            push_log(log, line);
            events.push(CombatEvent::EffectExpired { on_player, name });
            effects.remove(i);
        } else {
            i += 1;
        }
    }
}
