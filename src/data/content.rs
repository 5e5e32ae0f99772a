//! Data-driven game definitions. A `ContentPack` is the raw JSON shape;
//! `GameContent` is the indexed, validated form the engine reads from.
//! Every cross-reference (recipe IO, shop listings, monster drops, slayer
//! regions) is checked at load so bad data fails fast instead of mid-fight.

use std::cell::RefCell;
use std::collections::BTreeMap;

use bevy_prng::WyRand;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{ActionDef, Currency, Item, Monster, Recipe, ShopEntry, SkillId};
use crate::rules::rng;

// Slayer fallbacks when neither region nor pack config says otherwise.
const ROLL_COST_FALLBACK: u32 = 5;
const ABANDON_COST_FALLBACK: u32 = 2;
const BONUS_PER_KILL_FALLBACK: f64 = 0.1;
const MIN_BONUS_FALLBACK: u32 = 10;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid content JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[error("{owner} references unknown {kind} `{id}`")]
    UnknownRef {
        owner: String,
        kind: &'static str,
        id: String,
    },
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SlayerCosts {
    pub roll: Option<u32>,
    pub abandon: Option<u32>,
    pub completion_bonus_per_kill: Option<f64>,
    pub min_completion_bonus: Option<u32>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct KillCountCfg {
    pub min_base: u32,
    pub max_base: u32,
    pub bump_per_combat_level: f64,
    pub max_bump: u32,
}

impl Default for KillCountCfg {
    fn default() -> Self {
        Self {
            min_base: 100,
            max_base: 150,
            bump_per_combat_level: 0.5,
            max_bump: 50,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SlayerRegion {
    pub id: String,
    pub label: String,
    pub monster_ids: Vec<String>,
    pub costs: Option<SlayerCosts>,
    pub kill_count: Option<KillCountCfg>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SlayerConfig {
    pub regions: Vec<SlayerRegion>,
    pub costs: Option<SlayerCosts>,
    pub kill_count: Option<KillCountCfg>,
}

/// Raw content pack as authored in JSON. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContentPack {
    pub items: Vec<Item>,
    pub monsters: Vec<Monster>,
    pub actions: Vec<ActionDef>,
    pub recipes: Vec<Recipe>,
    pub shop: Vec<ShopEntry>,
    pub currencies: Vec<Currency>,
    /// Legacy item-id spellings mapped to their canonical ids.
    pub aliases: BTreeMap<String, String>,
    pub slayer: SlayerConfig,
}

/// Indexed, validated game definitions.
#[derive(Debug)]
pub struct GameContent {
    items: BTreeMap<String, Item>,
    monsters: BTreeMap<String, Monster>,
    actions: BTreeMap<String, ActionDef>,
    recipes: BTreeMap<String, Recipe>,
    shop: Vec<ShopEntry>,
    currencies: BTreeMap<String, Currency>,
    aliases: BTreeMap<String, String>,
    slayer: SlayerConfig,
}

impl GameContent {
    pub fn load(json: &str) -> Result<Self, ContentError> {
        Self::from_pack(serde_json::from_str(json)?)
    }

    pub fn from_pack(pack: ContentPack) -> Result<Self, ContentError> {
        let mut items = BTreeMap::new();
        for item in pack.items {
            if items.insert(item.id.clone(), item.clone()).is_some() {
                return Err(ContentError::DuplicateId {
                    kind: "item",
                    id: item.id,
                });
            }
        }

        let mut monsters = BTreeMap::new();
        for mut monster in pack.monsters {
            monster.normalize();
            if monsters.insert(monster.id.clone(), monster.clone()).is_some() {
                return Err(ContentError::DuplicateId {
                    kind: "monster",
                    id: monster.id,
                });
            }
        }

        let mut actions = BTreeMap::new();
        for action in pack.actions {
            if actions.insert(action.id.clone(), action.clone()).is_some() {
                return Err(ContentError::DuplicateId {
                    kind: "action",
                    id: action.id,
                });
            }
        }

        let mut recipes = BTreeMap::new();
        for recipe in pack.recipes {
            if recipes.insert(recipe.id.clone(), recipe.clone()).is_some() {
                return Err(ContentError::DuplicateId {
                    kind: "recipe",
                    id: recipe.id,
                });
            }
        }

        let mut currencies = BTreeMap::new();
        for currency in pack.currencies {
            if currencies
                .insert(currency.id.clone(), currency.clone())
                .is_some()
            {
                return Err(ContentError::DuplicateId {
                    kind: "currency",
                    id: currency.id,
                });
            }
        }

        let content = Self {
            items,
            monsters,
            actions,
            recipes,
            shop: pack.shop,
            currencies,
            aliases: pack.aliases,
            slayer: pack.slayer,
        };
        content.validate()?;

        log::info!(
            "content pack loaded: {} items, {} monsters, {} actions, {} recipes, {} shop entries",
            content.items.len(),
            content.monsters.len(),
            content.actions.len(),
            content.recipes.len(),
            content.shop.len(),
        );
        Ok(content)
    }

    fn validate(&self) -> Result<(), ContentError> {
        let unknown_item = |owner: String, id: &str| ContentError::UnknownRef {
            owner,
            kind: "item",
            id: id.to_string(),
        };

        for recipe in self.recipes.values() {
            for io in recipe.inputs.iter().chain(&recipe.outputs) {
                if self.item(&io.id).is_none() {
                    return Err(unknown_item(format!("recipe `{}`", recipe.id), &io.id));
                }
            }
        }
        for entry in &self.shop {
            if self.item(&entry.item_id).is_none() {
                return Err(unknown_item(
                    format!("shop entry `{}`", entry.id),
                    &entry.item_id,
                ));
            }
        }
        for monster in self.monsters.values() {
            for drop in &monster.drops {
                if self.item(&drop.item_id).is_none() {
                    return Err(unknown_item(
                        format!("monster `{}`", monster.id),
                        &drop.item_id,
                    ));
                }
            }
        }
        for region in &self.slayer.regions {
            for monster_id in &region.monster_ids {
                if !self.monsters.contains_key(monster_id) {
                    return Err(ContentError::UnknownRef {
                        owner: format!("slayer region `{}`", region.id),
                        kind: "monster",
                        id: monster_id.clone(),
                    });
                }
            }
        }
        for alias in self.aliases.values() {
            if !self.items.contains_key(alias) {
                return Err(unknown_item("alias table".to_string(), alias));
            }
        }
        Ok(())
    }

    // ===== Lookups =====

    /// Resolve legacy item-id spellings to their canonical form.
    pub fn canonical_item_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.aliases.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(self.canonical_item_id(id))
    }

    /// Display name for an item id, falling back to the id itself.
    pub fn item_name(&self, id: &str) -> String {
        self.item(id)
            .map(|item| item.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn monster(&self, id: &str) -> Option<&Monster> {
        self.monsters.get(id)
    }

    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.values()
    }

    pub fn action(&self, id: &str) -> Option<&ActionDef> {
        self.actions.get(id)
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    pub fn recipes_by_skill(&self, skill: SkillId) -> Vec<&Recipe> {
        self.recipes
            .values()
            .filter(|r| r.skill == Some(skill))
            .collect()
    }

    pub fn currency(&self, id: &str) -> Option<&Currency> {
        self.currencies.get(id)
    }

    pub fn actions_by_skill(&self, skill: SkillId) -> Vec<&ActionDef> {
        let mut out: Vec<&ActionDef> = self
            .actions
            .values()
            .filter(|a| a.skill == skill)
            .collect();
        out.sort_by_key(|a| a.required_level());
        out
    }

    /// Highest-requirement action of the skill the given level unlocks.
    pub fn best_unlocked_action(&self, skill: SkillId, level: u32) -> Option<&ActionDef> {
        self.actions_by_skill(skill)
            .into_iter()
            .filter(|a| a.required_level() <= level.max(1))
            .max_by_key(|a| a.required_level())
    }

    pub fn shop_entries(&self) -> &[ShopEntry] {
        &self.shop
    }

    pub fn shop_entry_for(&self, item_id: &str) -> Option<&ShopEntry> {
        let canonical = self.canonical_item_id(item_id);
        self.shop.iter().find(|e| e.item_id == canonical)
    }

    // ===== Slayer config (region overrides fall back to pack, then defaults) =====

    pub fn slayer_regions(&self) -> &[SlayerRegion] {
        &self.slayer.regions
    }

    pub fn slayer_region(&self, id: &str) -> Option<&SlayerRegion> {
        self.slayer.regions.iter().find(|r| r.id == id)
    }

    fn region_costs(&self, region_id: &str) -> Option<&SlayerCosts> {
        self.slayer_region(region_id).and_then(|r| r.costs.as_ref())
    }

    pub fn slayer_roll_cost(&self, region_id: &str) -> u32 {
        self.region_costs(region_id)
            .and_then(|c| c.roll)
            .or_else(|| self.slayer.costs.as_ref().and_then(|c| c.roll))
            .unwrap_or(ROLL_COST_FALLBACK)
    }

    pub fn slayer_abandon_cost(&self, region_id: &str) -> u32 {
        self.region_costs(region_id)
            .and_then(|c| c.abandon)
            .or_else(|| self.slayer.costs.as_ref().and_then(|c| c.abandon))
            .unwrap_or(ABANDON_COST_FALLBACK)
    }

    /// Completion bonus: per-kill rate over the task size, floored at a minimum.
    pub fn slayer_completion_bonus(&self, required: u32, region_id: &str) -> u32 {
        let costs = self
            .region_costs(region_id)
            .or(self.slayer.costs.as_ref());
        let per_kill = costs
            .and_then(|c| c.completion_bonus_per_kill)
            .unwrap_or(BONUS_PER_KILL_FALLBACK)
            .max(0.0);
        let min_bonus = costs
            .and_then(|c| c.min_completion_bonus)
            .unwrap_or(MIN_BONUS_FALLBACK);
        let by_rate = (required as f64 * per_kill).floor() as u32;
        by_rate.max(min_bonus)
    }

    /// Required kill count for a new task, bumped by combat level.
    pub fn roll_slayer_kill_count(
        &self,
        rng: &RefCell<WyRand>,
        combat_level: u32,
        region_id: &str,
    ) -> u32 {
        let cfg = self
            .slayer_region(region_id)
            .and_then(|r| r.kill_count)
            .or(self.slayer.kill_count)
            .unwrap_or_default();

        let bump = ((combat_level as f64 * cfg.bump_per_combat_level).floor() as u32)
            .min(cfg.max_bump);
        let lo = cfg.min_base + bump;
        let hi = cfg.max_base + bump;
        rng::range_inclusive(rng, lo.min(hi) as i64, lo.max(hi) as i64) as u32
    }
}
