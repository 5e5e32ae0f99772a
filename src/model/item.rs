use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{SkillId, Stats};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    Equipment,
    Consumable,
    Material,
}

/// Equipment slot identifiers used by `PlayerCharacter::equipment` and `Item::slot`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentSlot {
    Weapon,
    Helmet,
    Cape,
    Gloves,
    Armor,
    Shield,
    Bow,
    Pants,
    Ring,
    Boots,
    Tool,
    Blessing,
}

/// Loot drop entry for monsters; `chance` is 0..1 per kill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Drop {
    pub item_id: String,
    #[serde(default)]
    pub chance: f64,
    #[serde(default)]
    pub min: u32,
    #[serde(default)]
    pub max: u32,
}

/// Item definition usable for equipment, consumables, or materials.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub slot: Option<EquipmentSlot>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub stats: Option<Stats>,
    /// Heal amount if this is a consumable food.
    #[serde(default)]
    pub heal: Option<i32>,
    /// Optional skill buffs (e.g. {"ATTACK": 3, "MINING": 5}).
    #[serde(default)]
    pub skill_buffs: BTreeMap<SkillId, i32>,
}

impl Item {
    pub fn is_food(&self) -> bool {
        self.kind == ItemKind::Consumable && self.heal.is_some_and(|h| h > 0)
    }

    pub fn is_potion(&self) -> bool {
        self.kind == ItemKind::Consumable && !self.is_food()
    }

    pub fn is_combat_potion(&self) -> bool {
        self.is_potion()
            && (self.stats.is_some() || self.skill_buffs.keys().any(|s| s.is_combat()))
    }

    pub fn is_non_combat_potion(&self) -> bool {
        self.is_potion()
            && !self.skill_buffs.is_empty()
            && self.skill_buffs.keys().all(|s| !s.is_combat())
    }
}
