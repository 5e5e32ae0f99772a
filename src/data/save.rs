//! Versioned save snapshots. Every load path runs `normalize()` so defaults,
//! clamps, and legacy migrations apply no matter where the bytes came from.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::collections::BTreeMap;

use crate::model::{Job, PlayerCharacter, SkillId, SlayerAssignment};

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("invalid save JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The gathering loop that was running when the snapshot was taken, so the
/// next session can pay out the absence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunningAction {
    pub action_id: String,
    pub started_at_ms: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveGame {
    pub version: u32,
    /// Freshness stamp compared by `data::sync::reconcile`.
    pub updated_at_ms: u64,
    /// Basis for offline catch-up on the next load.
    pub last_seen_ms: u64,
    pub player: PlayerCharacter,
    pub slayer: Option<SlayerAssignment>,
    pub training_skill: Option<SkillId>,
    pub running_action: Option<RunningAction>,
    pub jobs: Vec<Job>,
    /// Last action picked per skill, so menus can reopen where the player was.
    pub last_actions: BTreeMap<SkillId, String>,
}

impl Default for SaveGame {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            updated_at_ms: 0,
            last_seen_ms: 0,
            player: PlayerCharacter::default(),
            slayer: None,
            training_skill: None,
            running_action: None,
            jobs: Vec::new(),
            last_actions: BTreeMap::new(),
        }
    }
}

impl SaveGame {
    /// Repair whatever deserialization let through: seed currencies, migrate
    /// level-stored skills, clamp crit fields, and fix degenerate bases.
    pub fn normalize(&mut self) {
        self.player.migrate_skills_from_levels();
        self.player.normalize_currencies();

        let base = &mut self.player.base;
        if base.health <= 0 {
            base.health = 100;
        }
        if base.crit_multiplier < 1.0 {
            base.crit_multiplier = 1.5;
        }
        base.crit_chance = base.crit_chance.clamp(0.0, 1.0);

        if let Some(assignment) = self.slayer.as_mut() {
            assignment.normalize();
        }
        if self.version == 0 {
            self.version = SAVE_VERSION;
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and normalize in one step.
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        let mut save: SaveGame = serde_json::from_str(json)?;
        save.normalize();
        Ok(save)
    }
}

/// Where snapshots live. Implementations decide the medium; the engine only
/// ever sees `SaveGame`s.
pub trait SaveStore {
    fn load(&self) -> Result<Option<SaveGame>, SaveError>;
    fn save(&self, save: &SaveGame) -> Result<(), SaveError>;
}

/// Plain JSON file on disk. A missing file is an empty store, not an error.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SaveStore for JsonFileStore {
    fn load(&self) -> Result<Option<SaveGame>, SaveError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let save = SaveGame::from_json(&text)?;
                log::info!("loaded save from {}", self.path.display());
                Ok(Some(save))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, save: &SaveGame) -> Result<(), SaveError> {
        fs::write(&self.path, save.to_json()?)?;
        Ok(())
    }
}
