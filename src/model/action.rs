use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::SkillId;

/// A repeatable gathering action ("mine_copper", "chop_oak", ...).
/// Output keys name items, or currencies via the `currency:` prefix.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionDef {
    pub id: String,
    pub name: String,
    pub skill: SkillId,
    pub duration_ms: u64,
    #[serde(default)]
    pub exp: u32,
    #[serde(default)]
    pub outputs: BTreeMap<String, u32>,
    #[serde(default)]
    pub req_level: u32,
}

impl ActionDef {
    /// Level required to run this action (at least 1).
    pub fn required_level(&self) -> u32 {
        self.req_level.max(1)
    }
}
