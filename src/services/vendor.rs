//! Vendor economy: purchases check stock and both currencies before any
//! mutation; sales refund a quarter of each listed price.

use thiserror::Error;

use crate::model::{PlayerCharacter, ShopEntry};

/// One quarter of the purchase price comes back when selling.
const SELL_BACK_DIVISOR: i64 = 4;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VendorError {
    #[error("quantity must be positive")]
    BadQuantity,
    #[error("only {available} in stock")]
    OutOfStock { available: u32 },
    #[error("not enough {currency}")]
    InsufficientFunds { currency: &'static str },
    #[error("only {have}x {item_id} in the bag")]
    MissingItems { item_id: String, have: i64 },
}

pub fn buy(
    player: &mut PlayerCharacter,
    entry: &mut ShopEntry,
    qty: u32,
) -> Result<(), VendorError> {
    if qty == 0 {
        return Err(VendorError::BadQuantity);
    }
    if let Some(stock) = entry.stock {
        if stock < qty {
            return Err(VendorError::OutOfStock { available: stock });
        }
    }
    let silver_cost = entry.price_silver as i64 * qty as i64;
    let gold_cost = entry.price_gold as i64 * qty as i64;
    if player.currency("silver") < silver_cost {
        return Err(VendorError::InsufficientFunds { currency: "silver" });
    }
    if player.currency("gold") < gold_cost {
        return Err(VendorError::InsufficientFunds { currency: "gold" });
    }

    if silver_cost > 0 {
        player.spend_currency("silver", silver_cost);
    }
    if gold_cost > 0 {
        player.spend_currency("gold", gold_cost);
    }
    player.add_item(&entry.item_id, qty as i64);
    if let Some(stock) = entry.stock.as_mut() {
        *stock -= qty;
    }
    Ok(())
}

/// Removes items from the bag and refunds `(gold_back, silver_back)`.
pub fn sell(
    player: &mut PlayerCharacter,
    entry: &ShopEntry,
    qty: u32,
) -> Result<(i64, i64), VendorError> {
    if qty == 0 {
        return Err(VendorError::BadQuantity);
    }
    let have = player.item_count(&entry.item_id);
    if have < qty as i64 {
        return Err(VendorError::MissingItems {
            item_id: entry.item_id.clone(),
            have,
        });
    }
    player.add_item(&entry.item_id, -(qty as i64));
    let gold_back = entry.price_gold as i64 * qty as i64 / SELL_BACK_DIVISOR;
    let silver_back = entry.price_silver as i64 * qty as i64 / SELL_BACK_DIVISOR;
    if gold_back > 0 {
        player.add_currency("gold", gold_back);
    }
    if silver_back > 0 {
        player.add_currency("silver", silver_back);
    }
    Ok((gold_back, silver_back))
}
