use serde::{Deserialize, Serialize};

/// All skills (combat + non-combat).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillId {
    // Combat
    Attack,
    Strength,
    Defense,
    Archery,
    Magic,
    Hp,
    // Non-combat
    Woodcutting,
    Mining,
    Fishing,
    Gathering,
    Hunting,
    Crafting,
    Smithing,
    Cooking,
    Alchemy,
    Tailoring,
    Carpentry,
    Enchanting,
    Community,
    Harvesting,
}

impl SkillId {
    pub const ALL: [SkillId; 20] = [
        SkillId::Attack,
        SkillId::Strength,
        SkillId::Defense,
        SkillId::Archery,
        SkillId::Magic,
        SkillId::Hp,
        SkillId::Woodcutting,
        SkillId::Mining,
        SkillId::Fishing,
        SkillId::Gathering,
        SkillId::Hunting,
        SkillId::Crafting,
        SkillId::Smithing,
        SkillId::Cooking,
        SkillId::Alchemy,
        SkillId::Tailoring,
        SkillId::Carpentry,
        SkillId::Enchanting,
        SkillId::Community,
        SkillId::Harvesting,
    ];

    pub fn is_combat(self) -> bool {
        matches!(
            self,
            SkillId::Attack
                | SkillId::Strength
                | SkillId::Defense
                | SkillId::Archery
                | SkillId::Magic
                | SkillId::Hp
        )
    }

    /// Stable lowercase key for rate tracking and display.
    pub fn as_str(self) -> &'static str {
        match self {
            SkillId::Attack => "attack",
            SkillId::Strength => "strength",
            SkillId::Defense => "defense",
            SkillId::Archery => "archery",
            SkillId::Magic => "magic",
            SkillId::Hp => "hp",
            SkillId::Woodcutting => "woodcutting",
            SkillId::Mining => "mining",
            SkillId::Fishing => "fishing",
            SkillId::Gathering => "gathering",
            SkillId::Hunting => "hunting",
            SkillId::Crafting => "crafting",
            SkillId::Smithing => "smithing",
            SkillId::Cooking => "cooking",
            SkillId::Alchemy => "alchemy",
            SkillId::Tailoring => "tailoring",
            SkillId::Carpentry => "carpentry",
            SkillId::Enchanting => "enchanting",
            SkillId::Community => "community",
            SkillId::Harvesting => "harvesting",
        }
    }
}
