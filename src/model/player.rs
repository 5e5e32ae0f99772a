use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Element, EquipmentSlot, SkillId, Stats};
use crate::rules::level_curve;

/// Bonus max HP per HP skill level above 1.
pub const HP_PER_LEVEL: i32 = 10;

/// Persistent character state: inventory, equipment, skill XP, currencies,
/// and base combat stats.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerCharacter {
    pub bag: BTreeMap<String, i64>,
    pub equipment: BTreeMap<EquipmentSlot, String>,
    /// Stores XP per skill (not level). Old saves that stored levels are
    /// migrated on load.
    pub skills: BTreeMap<SkillId, u64>,
    /// Overall character XP, on the same curve as skills.
    pub exp: u64,
    pub currencies: BTreeMap<String, i64>,
    pub base: Stats,
    pub element: Element,
    pub current_hp: Option<i32>,
    pub quick_food: Option<String>,
}

impl Default for PlayerCharacter {
    fn default() -> Self {
        Self {
            bag: BTreeMap::new(),
            equipment: BTreeMap::new(),
            skills: BTreeMap::new(),
            exp: 0,
            currencies: BTreeMap::new(),
            base: Stats::new(12, 6, 0.0, 100, 0.05, 1.5),
            element: Element::Neutral,
            current_hp: None,
            quick_food: None,
        }
    }
}

impl PlayerCharacter {
    // ===== Currency helpers =====

    /// Seed the soft and premium ledgers so lookups never miss.
    pub fn normalize_currencies(&mut self) {
        self.currencies.entry("gold".to_string()).or_insert(0);
        self.currencies.entry("silver".to_string()).or_insert(0);
    }

    pub fn currency(&self, id: &str) -> i64 {
        self.currencies.get(id).copied().unwrap_or(0)
    }

    pub fn add_currency(&mut self, id: &str, amount: i64) {
        *self.currencies.entry(id.to_string()).or_insert(0) += amount;
    }

    /// Fails without mutating when the balance is short.
    pub fn spend_currency(&mut self, id: &str, amount: i64) -> bool {
        let have = self.currency(id);
        if have < amount {
            return false;
        }
        self.currencies.insert(id.to_string(), have - amount);
        true
    }

    // ===== Inventory helpers =====

    pub fn item_count(&self, id: &str) -> i64 {
        self.bag.get(id).copied().unwrap_or(0)
    }

    /// Adds (or removes, with a negative delta) items; empty stacks are dropped.
    pub fn add_item(&mut self, id: &str, delta: i64) {
        if id.is_empty() || delta == 0 {
            return;
        }
        let qty = self.bag.entry(id.to_string()).or_insert(0);
        *qty += delta;
        if *qty <= 0 {
            self.bag.remove(id);
        }
    }

    // ===== Skill XP =====

    pub fn skill_xp(&self, id: SkillId) -> u64 {
        self.skills.get(&id).copied().unwrap_or(0)
    }

    pub fn skill_level(&self, id: SkillId) -> u32 {
        level_curve::level_for_xp(self.skill_xp(id))
    }

    /// Adds XP to a skill and returns true if at least one level was gained.
    pub fn add_skill_xp(&mut self, id: SkillId, amount: u64) -> bool {
        if amount == 0 {
            return false;
        }
        let old_xp = self.skill_xp(id);
        let new_xp = old_xp + amount;
        self.skills.insert(id, new_xp);
        level_curve::level_for_xp(new_xp) > level_curve::level_for_xp(old_xp)
    }

    // ===== Overall character level (same curve) =====

    pub fn player_level(&self) -> u32 {
        level_curve::level_for_xp(self.exp)
    }

    pub fn player_xp_into_level(&self) -> u64 {
        level_curve::xp_into_level(self.exp, self.player_level())
    }

    pub fn player_xp_for_next_level(&self) -> u64 {
        level_curve::xp_for_next_level(self.player_level())
    }

    // ===== Stats aggregation =====

    /// Base + gear, plus bonus health from the HP skill. Clamps `current_hp`
    /// into the new maximum as a side effect.
    pub fn total_stats(&mut self, gear: Option<&Stats>) -> Stats {
        let mut out = self.base;
        if let Some(gear) = gear {
            out = Stats::combine(&out, gear);
        }

        let hp_level = self.skill_level(SkillId::Hp);
        if hp_level > 1 {
            out.health += (hp_level as i32 - 1) * HP_PER_LEVEL;
        }

        let max_hp = out.health.max(1);
        match self.current_hp {
            None => self.current_hp = Some(max_hp),
            Some(hp) if hp > max_hp => self.current_hp = Some(max_hp),
            Some(_) => {}
        }

        out
    }

    // ===== Migration =====

    /// Convert legacy saves that stored a skill LEVEL instead of XP.
    /// Heuristic: any stored value in 1..=99 is read as a level.
    pub fn migrate_skills_from_levels(&mut self) {
        let mut fixed = BTreeMap::new();
        for (&id, &stored) in &self.skills {
            let xp = if stored > 0 && stored <= level_curve::MAX_LEVEL as u64 {
                level_curve::xp_to_reach_level(stored as u32)
            } else {
                stored
            };
            fixed.insert(id, xp);
        }
        self.skills = fixed;
    }
}
