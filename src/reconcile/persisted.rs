//! Server-side order state, as last read from the order-read boundary

use crate::cart::CanonicalKey;
use crate::menu::SelectedOption;
use crate::money::Money;
use crate::{MenuItemId, OptionAssignmentId, OptionGroupId, OptionValueId, OrderId, OrderItemId};
use serde::{Deserialize, Serialize};

/// One persisted option assignment of an order item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedOption {
    /// Server-assigned id; absent when the read boundary does not expose it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<OptionAssignmentId>,
    pub group_id: OptionGroupId,
    pub value_id: OptionValueId,
    pub price_delta: Money,
}

impl PersistedOption {
    pub fn new(
        assignment_id: Option<OptionAssignmentId>,
        group_id: OptionGroupId,
        value_id: OptionValueId,
        price_delta: Money,
    ) -> Self {
        Self {
            assignment_id,
            group_id,
            value_id,
            price_delta,
        }
    }

    pub fn identity(&self) -> (OptionGroupId, OptionValueId) {
        (self.group_id, self.value_id)
    }
}

/// One line of the order as the server currently stores it.
/// Never mutated locally; only diffed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedOrderItem {
    pub order_item_id: OrderItemId,
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    #[serde(default)]
    pub options: Vec<PersistedOption>,
}

impl PersistedOrderItem {
    /// Persisted options as selections, sorted canonically
    pub fn selections(&self) -> Vec<SelectedOption> {
        let mut selections: Vec<SelectedOption> = self
            .options
            .iter()
            .map(|o| SelectedOption::new(o.group_id, o.value_id, o.price_delta))
            .collect();
        selections.sort();
        selections
    }

    pub fn key(&self) -> CanonicalKey {
        CanonicalKey::new(self.menu_item_id, &self.selections())
    }
}

/// An order as read back from the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedOrder {
    pub order_id: OrderId,
    pub items: Vec<PersistedOrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_matches_cart_key() {
        let row = PersistedOrderItem {
            order_item_id: 9,
            menu_item_id: 1,
            quantity: 2,
            options: vec![
                PersistedOption::new(Some(31), 20, 201, Money::from_units(10)),
                PersistedOption::new(Some(30), 10, 102, Money::ZERO),
            ],
        };
        assert_eq!(row.key().as_str(), "1#10:102|20:201");
        assert_eq!(row.selections()[0].value_id, 102);
    }

    #[test]
    fn test_options_default_to_empty() {
        let row: PersistedOrderItem =
            serde_json::from_str(r#"{"order_item_id":1,"menu_item_id":2,"quantity":1}"#).unwrap();
        assert!(row.options.is_empty());
        assert_eq!(row.key().as_str(), "2#");
    }
}
