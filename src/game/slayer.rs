//! Slayer tasks: roll an assignment from a region, earn per-kill coins
//! while it is active, and claim the completion bonus. Rerolls and
//! abandons cost slayer coins.

use thiserror::Error;

use crate::game::Game;
use crate::model::SlayerAssignment;
use crate::rules::rng;

pub const SLAYER_CURRENCY: &str = "slayer";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SlayerError {
    #[error("unknown slayer region `{0}`")]
    UnknownRegion(String),
    #[error("region `{0}` has no monsters")]
    EmptyRegion(String),
    #[error("finish or abandon the current task first")]
    TaskInProgress,
    #[error("need {0} slayer coins")]
    InsufficientCoins(u32),
    #[error("no slayer task active")]
    NoTask,
    #[error("task not complete yet")]
    TaskIncomplete,
}

impl Game {
    pub fn slayer_assignment(&self) -> Option<&SlayerAssignment> {
        self.slayer.as_ref()
    }

    /// Roll a new task from a region. Replacing an unfinished task requires
    /// `force` and costs the region's reroll fee.
    pub fn roll_slayer_task(
        &mut self,
        region_id: &str,
        force: bool,
        now_ms: u64,
    ) -> Result<SlayerAssignment, SlayerError> {
        let rerolling = self.slayer.as_ref().is_some_and(|a| !a.is_complete());
        if rerolling && !force {
            return Err(SlayerError::TaskInProgress);
        }

        let (region_label, monster_ids) = {
            let region = self
                .content
                .slayer_region(region_id)
                .ok_or_else(|| SlayerError::UnknownRegion(region_id.to_string()))?;
            (region.label.clone(), region.monster_ids.clone())
        };
        if monster_ids.is_empty() {
            return Err(SlayerError::EmptyRegion(region_id.to_string()));
        }

        if rerolling {
            let cost = self.content.slayer_roll_cost(region_id);
            if cost > 0 && !self.player.spend_currency(SLAYER_CURRENCY, cost as i64) {
                return Err(SlayerError::InsufficientCoins(cost));
            }
        }

        let monster_id = match rng::pick(&self.rng, &monster_ids) {
            Some(id) => id.clone(),
            None => return Err(SlayerError::EmptyRegion(region_id.to_string())),
        };
        let required =
            self.content
                .roll_slayer_kill_count(&self.rng, self.combat_level(), region_id);
        let bonus = self.content.slayer_completion_bonus(required, region_id);
        let monster_name = self
            .content
            .monster(&monster_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| monster_id.clone());
        let label = format!("{region_label}: {monster_name}");

        let assignment =
            SlayerAssignment::new(region_id, &monster_id, label, required, bonus, now_ms);
        log::info!("slayer task assigned: {}x {}", required, monster_id);
        self.slayer = Some(assignment.clone());
        Ok(assignment)
    }

    /// Count a kill toward the active task. Grants the monster's per-kill
    /// slayer coins only while the task matches and is unfinished.
    pub fn record_kill(&mut self, monster_id: &str) {
        let Some(assignment) = self.slayer.as_mut() else {
            return;
        };
        if assignment.is_complete() || !assignment.monster_id.eq_ignore_ascii_case(monster_id) {
            return;
        }

        assignment.increment(1);
        let complete = assignment.is_complete();
        let reward = self
            .content
            .monster(monster_id)
            .map(|m| m.slayer_reward)
            .unwrap_or(0);
        if reward > 0 {
            self.player.add_currency(SLAYER_CURRENCY, reward as i64);
        }
        if complete {
            log::info!("slayer task complete: {monster_id}");
        }
    }

    /// Drop the current task for a fee.
    pub fn abandon_slayer_task(&mut self) -> Result<(), SlayerError> {
        let assignment = self.slayer.clone().ok_or(SlayerError::NoTask)?;
        let cost = self.content.slayer_abandon_cost(&assignment.region_id);
        if !self.player.spend_currency(SLAYER_CURRENCY, cost as i64) {
            return Err(SlayerError::InsufficientCoins(cost));
        }
        self.slayer = None;
        Ok(())
    }

    /// Claim a finished task; returns the bonus granted.
    pub fn claim_slayer_task(&mut self) -> Result<u32, SlayerError> {
        let assignment = self.slayer.clone().ok_or(SlayerError::NoTask)?;
        if !assignment.is_complete() {
            return Err(SlayerError::TaskIncomplete);
        }
        let reward = if assignment.completion_bonus > 0 {
            assignment.completion_bonus
        } else {
            self.content
                .slayer_completion_bonus(assignment.required, &assignment.region_id)
        };
        self.player.add_currency(SLAYER_CURRENCY, reward as i64);
        self.slayer = None;
        Ok(reward)
    }
}
