use serde::{Deserialize, Serialize};

/// Persisted slayer task state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlayerAssignment {
    pub region_id: String,
    /// Monster to kill (single id).
    pub monster_id: String,
    /// Display label (region + monster name).
    pub label: String,
    /// Kills required to complete the task.
    pub required: u32,
    /// Completed kills (`progress` is a legacy alias in old saves).
    #[serde(alias = "progress")]
    pub done: u32,
    /// Extra coins granted on completion.
    pub completion_bonus: u32,
    pub assigned_at_ms: u64,
}

impl SlayerAssignment {
    pub fn new(
        region_id: impl Into<String>,
        monster_id: impl Into<String>,
        label: impl Into<String>,
        required: u32,
        completion_bonus: u32,
        assigned_at_ms: u64,
    ) -> Self {
        Self {
            region_id: region_id.into(),
            monster_id: monster_id.into(),
            label: label.into(),
            required: required.max(1),
            done: 0,
            completion_bonus,
            assigned_at_ms,
        }
    }

    /// Ensure fields are sane after deserialization.
    pub fn normalize(&mut self) {
        if self.required < 1 {
            self.required = 1;
        }
        if self.label.is_empty() {
            self.label = self.monster_id.clone();
        }
    }

    pub fn increment(&mut self, delta: u32) {
        self.done += delta;
    }

    pub fn is_complete(&self) -> bool {
        self.done >= self.required
    }

    pub fn remaining(&self) -> u32 {
        self.required.saturating_sub(self.done)
    }
}
