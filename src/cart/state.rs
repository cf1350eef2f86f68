//! Cart state: the serialisable list of entries

use super::item::{CartEntry, ConfiguredItem};
use super::key::CanonicalKey;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Ordered cart entries; no two share a canonical key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub entries: Vec<CartEntry>,
}

/// Derived totals, recomputed on every read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Number of distinct lines
    pub item_count: usize,
    pub total_quantity: u32,
    pub total_price: Money,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn position(&self, key: &CanonicalKey) -> Option<usize> {
        self.entries.iter().position(|e| &e.key() == key)
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<&CartEntry> {
        self.entries.iter().find(|e| &e.key() == key)
    }

    pub fn contains(&self, key: &CanonicalKey) -> bool {
        self.position(key).is_some()
    }

    pub fn keys(&self) -> Vec<CanonicalKey> {
        self.entries.iter().map(CartEntry::key).collect()
    }

    /// The configured items, i.e. the desired order for reconciliation
    pub fn configured_items(&self) -> Vec<ConfiguredItem> {
        self.entries.iter().map(|e| e.item.clone()).collect()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.entries.len(),
            total_quantity: self.entries.iter().map(CartEntry::quantity).sum(),
            total_price: self.entries.iter().map(|e| e.extended_price).sum(),
        }
    }

    /// True when no two entries share a key and every extended price
    /// equals unit price times quantity
    pub fn is_consistent(&self) -> bool {
        let mut keys = self.keys();
        keys.sort();
        keys.dedup();
        keys.len() == self.entries.len()
            && self
                .entries
                .iter()
                .all(|e| e.quantity() > 0 && e.extended_price == e.unit_price * e.quantity())
    }
}
