use serde::{Deserialize, Serialize};

/// Currency definition ("silver", "gold", "slayer", ...).
/// Premium currencies are never awarded by gameplay.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Currency {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub premium: bool,
}
