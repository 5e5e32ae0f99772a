//! Pending loot: combat rewards buffer here until the player collects them,
//! so a defeat screen can show what dropped before it lands in the bag.

use crate::game::Game;
use crate::model::{Monster, SkillId};
use crate::rules::rng;

/// One merged stack of uncollected loot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingStack {
    pub id: String,
    pub name: String,
    pub qty: u64,
    pub currency: bool,
}

impl Game {
    pub fn add_pending_item(&mut self, item_id: &str, name: &str, qty: u64) {
        self.add_pending(item_id, name, qty, false);
    }

    pub fn add_pending_currency(&mut self, code: &str, name: &str, qty: u64) {
        self.add_pending(code, name, qty, true);
    }

    fn add_pending(&mut self, id: &str, name: &str, qty: u64, currency: bool) {
        if qty == 0 || id.is_empty() {
            return;
        }
        if let Some(stack) = self
            .pending
            .iter_mut()
            .find(|s| s.currency == currency && s.id == id)
        {
            stack.qty += qty;
            return;
        }
        self.pending.push(PendingStack {
            id: id.to_string(),
            name: name.to_string(),
            qty,
            currency,
        });
    }

    pub fn pending_loot(&self) -> &[PendingStack] {
        &self.pending
    }

    /// Move every pending stack into the bag / currency ledger.
    pub fn collect_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for stack in pending {
            if stack.currency {
                self.player.add_currency(&stack.id, stack.qty as i64);
            } else {
                self.player.add_item(&stack.id, stack.qty as i64);
            }
        }
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Settle a kill: XP to the selected training skill (Attack when unset),
    /// silver into pending currency, each drop rolled for chance and
    /// quantity, and the slayer task notified.
    pub(crate) fn grant_victory_rewards(&mut self, monster: &Monster, now_ms: u64) {
        let xp = monster.exp_per_kill() as u64;
        if xp > 0 {
            let skill = self.training_skill.unwrap_or(SkillId::Attack);
            self.add_skill_xp(skill, xp, now_ms);
        }

        if monster.silver_reward > 0 {
            self.add_pending_currency("silver", "Silver", monster.silver_reward as u64);
        }

        for drop in &monster.drops {
            if drop.chance <= 0.0 || !rng::chance(&self.rng, drop.chance) {
                continue;
            }
            let lo = drop.min.min(drop.max);
            let hi = drop.min.max(drop.max);
            let qty = rng::range_inclusive(&self.rng, lo as i64, hi as i64).max(1) as u64;
            let name = self.content.item_name(&drop.item_id);
            self.add_pending_item(&drop.item_id, &name, qty);
        }

        self.record_kill(&monster.id);
    }
}
