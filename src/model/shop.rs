use serde::{Deserialize, Serialize};

/// One vendor listing. `stock: None` means infinite supply.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShopEntry {
    pub id: String,
    pub item_id: String,
    /// Optional display override.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_gold: u32,
    #[serde(default)]
    pub price_silver: u32,
    #[serde(default)]
    pub stock: Option<u32>,
}
