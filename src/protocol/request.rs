//! Outbound wire format of the order-mutation endpoint
//!
//! ```json
//! {"order_id": 7, "items": [
//!   {"order_item_id": 9, "menu_item_id": 5, "quantity": 1, "action": "update",
//!    "options": [{"option_id": 10, "option_val_id": 102, "action": "add"}]}
//! ]}
//! ```

use crate::error::Result;
use crate::reconcile::{Action, MutationInstruction, OptionInstruction};
use crate::{MenuItemId, OptionGroupId, OptionValueId, OrderId, OrderItemId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireOption {
    pub option_id: OptionGroupId,
    pub option_val_id: OptionValueId,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireItem {
    /// Present for update/delete, absent for add
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_item_id: Option<OrderItemId>,
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    pub action: Action,
    #[serde(default)]
    pub options: Vec<WireOption>,
}

/// Body of `manageOrderItems`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageOrderItemsRequest {
    pub order_id: OrderId,
    pub items: Vec<WireItem>,
}

impl From<&OptionInstruction> for WireOption {
    fn from(option: &OptionInstruction) -> Self {
        WireOption {
            option_id: option.group_id,
            option_val_id: option.value_id,
            action: option.action,
        }
    }
}

impl From<&MutationInstruction> for WireItem {
    fn from(instruction: &MutationInstruction) -> Self {
        WireItem {
            order_item_id: instruction.order_item_id,
            menu_item_id: instruction.menu_item_id,
            quantity: instruction.quantity,
            action: instruction.action,
            options: instruction.options.iter().map(WireOption::from).collect(),
        }
    }
}

impl ManageOrderItemsRequest {
    pub fn new(order_id: OrderId, instructions: &[MutationInstruction]) -> Self {
        Self {
            order_id,
            items: instructions.iter().map(WireItem::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Encode an instruction list as the JSON request body
pub fn encode_request(order_id: OrderId, instructions: &[MutationInstruction]) -> Result<String> {
    ManageOrderItemsRequest::new(order_id, instructions).to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::ConfiguredItem;
    use crate::menu::SelectedOption;
    use crate::money::Money;
    use crate::reconcile::{reconcile, PersistedOption, PersistedOrderItem};
    use serde_json::json;

    #[test]
    fn test_encode_update_with_option_changes() {
        let persisted = vec![PersistedOrderItem {
            order_item_id: 9,
            menu_item_id: 5,
            quantity: 1,
            options: vec![PersistedOption::new(Some(90), 10, 101, Money::ZERO)],
        }];
        let desired = vec![ConfiguredItem::new(5, &[SelectedOption::new(10, 102, Money::ZERO)], 1)];
        let body = encode_request(7, &reconcile(&desired, &persisted)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "order_id": 7,
                "items": [{
                    "order_item_id": 9,
                    "menu_item_id": 5,
                    "quantity": 1,
                    "action": "update",
                    "options": [
                        {"option_id": 10, "option_val_id": 102, "action": "add"},
                        {"option_id": 10, "option_val_id": 101, "action": "delete"}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_add_omits_order_item_id() {
        let desired = vec![ConfiguredItem::new(2, &[], 3)];
        let request = ManageOrderItemsRequest::new(1, &reconcile(&desired, &[]));
        let value = serde_json::to_value(&request).unwrap();

        let item = &value["items"][0];
        assert!(item.get("order_item_id").is_none());
        assert_eq!(item["action"], "add");
        assert_eq!(item["quantity"], 3);
        assert_eq!(item["options"], json!([]));
    }

    #[test]
    fn test_empty_instruction_list() {
        assert_eq!(encode_request(4, &[]).unwrap(), r#"{"order_id":4,"items":[]}"#);
    }
}
