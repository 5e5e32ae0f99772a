//! The game facade: owns the content pack, the character, the RNG, and all
//! live loops (encounter, gathering action, jobs). Display layers read from
//! it; time enters as caller-supplied milliseconds.

pub mod combat;
pub mod loot;
pub mod slayer;

use std::cell::RefCell;
use std::collections::BTreeMap;

use bevy_prng::WyRand;
use rand_core::SeedableRng;
use thiserror::Error;

use crate::data::content::GameContent;
use crate::data::save::{RunningAction, SaveGame};
use crate::data::tracker::RateTracker;
use crate::engine::actions::{ActionProgress, ActionRunner, CycleReport};
use crate::engine::combat::Encounter;
use crate::engine::offline;
use crate::model::{
    ActionDef, EquipmentSlot, Job, PlayerCharacter, ResistanceTable, SkillId, SlayerAssignment,
    Stats,
};

pub use combat::CombatError;
pub use loot::PendingStack;
pub use slayer::SlayerError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EquipError {
    #[error("unknown item `{0}`")]
    UnknownItem(String),
    #[error("`{0}` has no equipment slot")]
    NotEquippable(String),
    #[error("`{0}` is not in the bag")]
    NotOwned(String),
    #[error("nothing equipped in {0:?}")]
    EmptySlot(EquipmentSlot),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConsumeError {
    #[error("`{0}` is not in the bag")]
    NotOwned(String),
    #[error("`{0}` is not edible")]
    NotFood(String),
    #[error("`{0}` is not a potion")]
    NotPotion(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("requires {skill:?} level {required}")]
    LevelTooLow { skill: SkillId, required: u32 },
}

/// What an offline catch-up paid out.
#[derive(Clone, Debug, Default)]
pub struct OfflineReport {
    pub elapsed_ms: u64,
    pub job_ticks: u64,
    pub action: Option<CycleReport>,
}

pub struct Game {
    pub(crate) content: GameContent,
    pub(crate) player: PlayerCharacter,
    pub(crate) rng: RefCell<WyRand>,
    pub(crate) pending: Vec<PendingStack>,
    pub(crate) slayer: Option<SlayerAssignment>,
    pub(crate) training_skill: Option<SkillId>,
    pub(crate) encounter: Option<Encounter>,
    pub(crate) action_runner: Option<ActionRunner>,
    pub(crate) saved_action: Option<RunningAction>,
    pub(crate) jobs: Vec<Job>,
    pub(crate) tracker: RateTracker,
    pub(crate) resistances: ResistanceTable,
    pub(crate) last_actions: BTreeMap<SkillId, String>,
    pub(crate) last_seen_ms: u64,
    pub(crate) last_combat_ms: u64,
}

impl Game {
    pub fn new(content: GameContent, seed: u64) -> Self {
        let mut player = PlayerCharacter::default();
        player.normalize_currencies();
        Self {
            content,
            player,
            rng: RefCell::new(WyRand::seed_from_u64(seed)),
            pending: Vec::new(),
            slayer: None,
            training_skill: None,
            encounter: None,
            action_runner: None,
            saved_action: None,
            jobs: Vec::new(),
            tracker: RateTracker::default(),
            resistances: ResistanceTable::default(),
            last_actions: BTreeMap::new(),
            last_seen_ms: 0,
            last_combat_ms: 0,
        }
    }

    /// Restore from a (normalized) snapshot. The persisted running action is
    /// paid out by the next `catch_up` call.
    pub fn from_save(content: GameContent, mut save: SaveGame, seed: u64) -> Self {
        save.normalize();
        log::info!(
            "restoring save (updated_at {} ms, last_seen {} ms)",
            save.updated_at_ms,
            save.last_seen_ms
        );
        let mut game = Self::new(content, seed);
        game.adopt(save);
        game
    }

    /// Replace character state with another snapshot (e.g. a newer remote
    /// copy after `data::sync::reconcile`). Live loops are dropped.
    pub fn adopt(&mut self, mut save: SaveGame) {
        save.normalize();
        self.player = save.player;
        self.slayer = save.slayer;
        self.training_skill = save.training_skill;
        self.saved_action = save.running_action;
        self.jobs = save.jobs;
        self.last_actions = save.last_actions;
        self.last_seen_ms = save.last_seen_ms;
        self.encounter = None;
        self.action_runner = None;
        self.pending.clear();
    }

    /// Snapshot the persistent state, stamped with `now_ms`.
    pub fn snapshot(&self, now_ms: u64) -> SaveGame {
        SaveGame {
            updated_at_ms: now_ms,
            last_seen_ms: now_ms,
            player: self.player.clone(),
            slayer: self.slayer.clone(),
            training_skill: self.training_skill,
            running_action: self.action_runner.as_ref().map(|runner| RunningAction {
                action_id: runner.action().id.clone(),
                started_at_ms: runner.started_at(),
            }),
            jobs: self.jobs.clone(),
            last_actions: self.last_actions.clone(),
            ..SaveGame::default()
        }
    }

    pub fn content(&self) -> &GameContent {
        &self.content
    }

    pub fn player(&self) -> &PlayerCharacter {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerCharacter {
        &mut self.player
    }

    // ===== Stats =====

    /// Combined stats of everything currently equipped.
    pub fn gear_stats(&self) -> Stats {
        let mut total = Stats::default();
        for item_id in self.player.equipment.values() {
            if let Some(stats) = self.content.item(item_id).and_then(|i| i.stats.as_ref()) {
                total = Stats::combine(&total, stats);
            }
        }
        total
    }

    pub fn total_stats(&mut self) -> Stats {
        let gear = self.gear_stats();
        self.player.total_stats(Some(&gear))
    }

    pub fn max_hp(&mut self) -> i32 {
        self.total_stats().health.max(1)
    }

    pub fn current_hp(&mut self) -> i32 {
        let max = self.max_hp();
        self.player.current_hp.unwrap_or(max).clamp(0, max)
    }

    pub fn set_current_hp(&mut self, hp: i32) {
        let max = self.max_hp();
        self.player.current_hp = Some(hp.clamp(0, max));
    }

    /// Combat level: best offensive skill, defense, and half of HP, halved.
    pub fn combat_level(&self) -> u32 {
        let attack = self.player.skill_level(SkillId::Attack);
        let strength = self.player.skill_level(SkillId::Strength);
        let defense = self.player.skill_level(SkillId::Defense);
        let archery = self.player.skill_level(SkillId::Archery);
        let magic = self.player.skill_level(SkillId::Magic);
        let hp = self.player.skill_level(SkillId::Hp);

        let offensive = attack.max(strength).max(archery.max(magic));
        let level = (offensive as f64 + defense as f64 + hp as f64 * 0.5) / 2.0;
        (level.round() as u32).clamp(1, 99)
    }

    // ===== Skills =====

    /// Adds XP, feeds the rate tracker, and reports a level-up.
    pub fn add_skill_xp(&mut self, id: SkillId, amount: u64, now_ms: u64) -> bool {
        if amount == 0 {
            return false;
        }
        self.tracker.note(id.as_str(), amount, now_ms);
        let leveled = self.player.add_skill_xp(id, amount);
        if leveled {
            log::info!("{} reached level {}", id.as_str(), self.player.skill_level(id));
        }
        leveled
    }

    pub fn skill_level(&self, id: SkillId) -> u32 {
        self.player.skill_level(id)
    }

    pub fn skill_xp(&self, id: SkillId) -> u64 {
        self.player.skill_xp(id)
    }

    pub fn xp_rate_per_hour(&mut self, skills: &[SkillId], window_ms: u64, now_ms: u64) -> f64 {
        self.tracker
            .rate_per_hour(skills.iter().map(|s| s.as_str()), window_ms, now_ms)
    }

    /// Which combat skill monster XP trains. Non-combat skills are rejected.
    pub fn set_training_skill(&mut self, skill: Option<SkillId>) -> bool {
        match skill {
            Some(id) if !id.is_combat() => false,
            other => {
                self.training_skill = other;
                true
            }
        }
    }

    pub fn training_skill(&self) -> Option<SkillId> {
        self.training_skill
    }

    // ===== Currencies =====

    pub fn currency(&self, id: &str) -> i64 {
        self.player.currency(id)
    }

    pub fn add_currency(&mut self, id: &str, amount: i64) {
        self.player.add_currency(id, amount);
    }

    pub fn spend_currency(&mut self, id: &str, amount: i64) -> bool {
        self.player.spend_currency(id, amount)
    }

    // ===== Equipment =====

    pub fn equip(&mut self, item_id: &str) -> Result<(), EquipError> {
        let canonical = self.content.canonical_item_id(item_id).to_string();
        let slot = match self.content.item(&canonical) {
            None => return Err(EquipError::UnknownItem(canonical)),
            Some(item) => match item.slot {
                None => return Err(EquipError::NotEquippable(canonical)),
                Some(slot) => slot,
            },
        };
        if self.player.item_count(&canonical) <= 0 {
            return Err(EquipError::NotOwned(canonical));
        }

        self.player.add_item(&canonical, -1);
        if let Some(previous) = self.player.equipment.insert(slot, canonical) {
            self.player.add_item(&previous, 1);
        }
        self.clamp_hp();
        Ok(())
    }

    /// Returns the item that came off.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<String, EquipError> {
        let previous = self
            .player
            .equipment
            .remove(&slot)
            .ok_or(EquipError::EmptySlot(slot))?;
        self.player.add_item(&previous, 1);
        self.clamp_hp();
        Ok(previous)
    }

    fn clamp_hp(&mut self) {
        let max = self.max_hp();
        let current = self.player.current_hp.unwrap_or(max);
        self.player.current_hp = Some(current.min(max));
    }

    // ===== Consumables =====

    /// Eat one unit of food. The item is consumed even at full HP;
    /// returns how much was actually healed.
    pub fn consume_food(&mut self, food_id: &str) -> Result<i32, ConsumeError> {
        let id = self.content.canonical_item_id(food_id).to_string();
        if self.player.item_count(&id) <= 0 {
            return Err(ConsumeError::NotOwned(id));
        }
        let heal = match self.content.item(&id) {
            Some(item) if item.is_food() => item.heal.unwrap_or(0),
            _ => return Err(ConsumeError::NotFood(id)),
        };

        let max = self.max_hp();
        let before = self.player.current_hp.unwrap_or(max).clamp(0, max);
        let after = (before + heal).min(max);
        self.player.current_hp = Some(after);
        self.player.add_item(&id, -1);
        Ok(after - before)
    }

    /// Drink one potion; healing potions heal, buff potions just report 0.
    pub fn consume_potion(&mut self, potion_id: &str) -> Result<i32, ConsumeError> {
        let id = self.content.canonical_item_id(potion_id).to_string();
        if self.player.item_count(&id) <= 0 {
            return Err(ConsumeError::NotOwned(id));
        }
        let heal = match self.content.item(&id) {
            Some(item) if item.is_potion() => item.heal.unwrap_or(0),
            _ => return Err(ConsumeError::NotPotion(id)),
        };

        let mut healed = 0;
        if heal > 0 {
            let max = self.max_hp();
            let before = self.player.current_hp.unwrap_or(max).clamp(0, max);
            let after = (before + heal).min(max);
            self.player.current_hp = Some(after);
            healed = after - before;
        }
        self.player.add_item(&id, -1);
        Ok(healed)
    }

    /// Bag contents that classify as food: (id, qty).
    pub fn food_items(&self) -> Vec<(String, i64)> {
        self.player
            .bag
            .iter()
            .filter(|(id, _)| self.content.item(id).is_some_and(|i| i.is_food()))
            .map(|(id, qty)| (id.clone(), *qty))
            .collect()
    }

    /// Bag contents that classify as potions, optionally filtered to combat
    /// or non-combat varieties.
    pub fn potions(&self, combat_only: bool, non_combat_only: bool) -> Vec<(String, i64)> {
        self.player
            .bag
            .iter()
            .filter(|(id, _)| {
                let Some(item) = self.content.item(id) else {
                    return false;
                };
                if !item.is_potion() {
                    return false;
                }
                if combat_only && !item.is_combat_potion() {
                    return false;
                }
                if non_combat_only && !item.is_non_combat_potion() {
                    return false;
                }
                true
            })
            .map(|(id, qty)| (id.clone(), *qty))
            .collect()
    }

    /// Bag listing with display names: (id, name, qty).
    pub fn bag_rows(&self) -> Vec<(String, String, i64)> {
        self.player
            .bag
            .iter()
            .map(|(id, qty)| (id.clone(), self.content.item_name(id), *qty))
            .collect()
    }

    // ===== Gathering actions =====

    /// Start (or restart) the gathering loop on an action.
    pub fn start_action(&mut self, action_id: &str, now_ms: u64) -> Result<(), ActionError> {
        let action = self
            .content
            .action(action_id)
            .cloned()
            .ok_or_else(|| ActionError::UnknownAction(action_id.to_string()))?;
        let required = action.required_level();
        if self.player.skill_level(action.skill) < required {
            return Err(ActionError::LevelTooLow {
                skill: action.skill,
                required,
            });
        }
        self.last_actions.insert(action.skill, action.id.clone());
        log::debug!("action loop started: {}", action.id);
        self.action_runner = Some(ActionRunner::start(action, now_ms));
        Ok(())
    }

    pub fn stop_action(&mut self) {
        self.action_runner = None;
        self.saved_action = None;
    }

    pub fn action_progress(&self, now_ms: u64) -> Option<ActionProgress> {
        self.action_runner.as_ref().map(|r| r.progress(now_ms))
    }

    pub fn running_action(&self) -> Option<&ActionDef> {
        self.action_runner.as_ref().map(ActionRunner::action)
    }

    /// Grant any cycles the running action completed since the last poll.
    pub fn poll_action(&mut self, now_ms: u64) -> Option<CycleReport> {
        let runner = self.action_runner.as_mut()?;
        let skill = runner.action().skill;
        let report = runner.poll(&mut self.player, now_ms);
        if report.cycles > 0 {
            self.tracker.note(skill.as_str(), report.xp, now_ms);
            log::debug!(
                "action completed {}x (+{} xp)",
                report.cycles,
                report.xp
            );
        }
        Some(report)
    }

    /// The action a skill menu should preselect: the last pick while it is
    /// still unlocked, otherwise the best unlocked one.
    pub fn pick_action(&self, skill: SkillId) -> Option<&ActionDef> {
        let level = self.player.skill_level(skill);
        if let Some(action) = self
            .last_actions
            .get(&skill)
            .and_then(|id| self.content.action(id))
        {
            if action.skill == skill && action.required_level() <= level {
                return Some(action);
            }
        }
        self.content.best_unlocked_action(skill, level)
    }

    // ===== Jobs & offline =====

    pub fn add_job(&mut self, job: Job) {
        self.jobs.push(job);
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Pay out everything that accrued since `last_seen_ms`: job ticks plus
    /// the persisted gathering loop (capped by the action engine).
    pub fn catch_up(&mut self, now_ms: u64) -> OfflineReport {
        let elapsed = now_ms.saturating_sub(self.last_seen_ms);
        let job_ticks = offline::catch_up_jobs(&mut self.jobs, self.last_seen_ms, now_ms);

        let mut action_report = None;
        if let Some(run) = self.saved_action.take() {
            if let Some(action) = self.content.action(&run.action_id).cloned() {
                let skill = action.skill;
                let (runner, report) =
                    ActionRunner::resume(action, &mut self.player, run.started_at_ms, now_ms);
                if report.xp > 0 {
                    self.tracker.note(skill.as_str(), report.xp, now_ms);
                }
                self.action_runner = Some(runner);
                action_report = Some(report);
            }
        }

        self.last_seen_ms = now_ms;
        log::info!(
            "offline catch-up: {} ms elapsed, {} job ticks",
            elapsed,
            job_ticks
        );
        OfflineReport {
            elapsed_ms: elapsed,
            job_ticks,
            action: action_report,
        }
    }

    // ===== Status resistances =====

    pub fn resistances(&self) -> &ResistanceTable {
        &self.resistances
    }

    pub fn resistances_mut(&mut self) -> &mut ResistanceTable {
        &mut self.resistances
    }
}
