//! Named loot tables with uniform picks. Rolls are fully determined by the
//! RNG state, so a seeded run reproduces exactly.

use std::cell::RefCell;
use std::collections::BTreeMap;

use bevy_prng::WyRand;

use crate::rules::rng;

#[derive(Clone, Debug, Default)]
pub struct LootTables {
    tables: BTreeMap<String, Vec<String>>,
}

impl LootTables {
    pub fn register(&mut self, id: impl Into<String>, entries: Vec<String>) {
        self.tables.insert(id.into(), entries);
    }

    pub fn roll(&self, table_id: &str, rng: &RefCell<WyRand>) -> Option<&str> {
        let table = self.tables.get(table_id)?;
        rng::pick(rng, table).map(String::as_str)
    }

    pub fn table(&self, table_id: &str) -> Option<&[String]> {
        self.tables.get(table_id).map(Vec::as_slice)
    }
}
