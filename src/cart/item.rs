//! Configured items and priced cart entries

use super::key::{normalize_selections, CanonicalKey};
use crate::menu::{price, MenuItem, SelectedOption};
use crate::money::Money;
use crate::MenuItemId;
use serde::{Deserialize, Serialize};

/// A menu item with its chosen options and quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredItem {
    pub menu_item_id: MenuItemId,
    /// Kept sorted by (group id, value id)
    pub selections: Vec<SelectedOption>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ConfiguredItem {
    pub fn new(menu_item_id: MenuItemId, selections: &[SelectedOption], quantity: u32) -> Self {
        Self {
            menu_item_id,
            selections: normalize_selections(selections),
            quantity,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn key(&self) -> CanonicalKey {
        CanonicalKey::new(self.menu_item_id, &self.selections)
    }
}

/// One cart line: a configured item plus its computed prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub item: ConfiguredItem,
    /// Display name captured from the menu
    pub name: String,
    pub unit_price: Money,
    pub extended_price: Money,
}

impl CartEntry {
    pub(crate) fn priced(menu_item: &MenuItem, item: ConfiguredItem) -> Self {
        let line = price(menu_item, &item.selections, item.quantity);
        Self {
            name: menu_item.name.clone(),
            unit_price: line.unit_price,
            extended_price: line.extended_price,
            item,
        }
    }

    pub fn key(&self) -> CanonicalKey {
        self.item.key()
    }

    pub fn quantity(&self) -> u32 {
        self.item.quantity
    }

    /// Change quantity, recomputing the extended price from the stored unit price
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.item.quantity = quantity;
        self.extended_price = self.unit_price * quantity;
    }
}
