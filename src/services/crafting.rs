//! Crafting: consume recipe inputs, grant outputs, award skill XP.
//! Failures are typed and mutate nothing.

use thiserror::Error;

use crate::model::{PlayerCharacter, Recipe, SkillId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CraftError {
    #[error("requires {skill:?} level {required}")]
    LevelTooLow { skill: SkillId, required: u32 },
    #[error("missing {qty}x {item_id}")]
    MissingInput { item_id: String, qty: u64 },
}

/// Checks the level gate and every input without touching the player.
pub fn can_craft(player: &PlayerCharacter, recipe: &Recipe) -> Result<(), CraftError> {
    if let Some(skill) = recipe.skill {
        if recipe.req_level > 1 && player.skill_level(skill) < recipe.req_level {
            return Err(CraftError::LevelTooLow {
                skill,
                required: recipe.req_level,
            });
        }
    }
    for input in &recipe.inputs {
        let have = player.item_count(&input.id).max(0);
        if have < input.qty as i64 {
            return Err(CraftError::MissingInput {
                item_id: input.id.clone(),
                qty: input.qty as u64 - have as u64,
            });
        }
    }
    Ok(())
}

/// Consumes inputs and grants outputs plus skill XP.
/// Returns whether a level was gained.
pub fn craft(player: &mut PlayerCharacter, recipe: &Recipe) -> Result<bool, CraftError> {
    can_craft(player, recipe)?;
    for input in &recipe.inputs {
        player.add_item(&input.id, -(input.qty as i64));
    }
    for output in &recipe.outputs {
        player.add_item(&output.id, output.qty as i64);
    }
    let mut leveled = false;
    if let Some(skill) = recipe.skill {
        if recipe.xp > 0 {
            leveled = player.add_skill_xp(skill, recipe.xp as u64);
        }
    }
    Ok(leveled)
}
