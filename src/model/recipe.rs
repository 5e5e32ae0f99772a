use serde::{Deserialize, Serialize};

use crate::model::SkillId;

/// Simple pair for recipe inputs/outputs (id + qty).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIo {
    pub id: String,
    pub qty: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skill: Option<SkillId>,
    #[serde(default)]
    pub req_level: u32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub inputs: Vec<RecipeIo>,
    #[serde(default)]
    pub outputs: Vec<RecipeIo>,
}
