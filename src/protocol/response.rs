//! Inbound wire formats: menu items and persisted orders
//!
//! The REST API wraps payloads in `{"status", "message", "data"}`; every
//! decoder here accepts either the envelope or the bare payload.

use crate::error::{OrderError, Result, SubmissionError};
use crate::menu::{MenuItem, OptionGroup, OptionValue, SelectionMode};
use crate::money::{Money, MINOR_UNITS};
use crate::reconcile::{PersistedOption, PersistedOrder, PersistedOrderItem};
use crate::{MenuItemId, OptionAssignmentId, OptionGroupId, OptionValueId, OrderId, OrderItemId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Option deltas arrive as `"10.00"` from the menu API and as numbers from
/// the order API
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Text(String),
    Number(f64),
}

impl Default for PriceField {
    fn default() -> Self {
        PriceField::Number(0.0)
    }
}

impl PriceField {
    fn to_money(&self) -> Result<Money> {
        match self {
            PriceField::Text(text) => Money::parse(text)
                .ok_or_else(|| OrderError::Serialization(format!("invalid price '{}'", text))),
            PriceField::Number(units) => money_from_units(*units),
        }
    }
}

fn money_from_units(units: f64) -> Result<Money> {
    if !units.is_finite() {
        return Err(OrderError::Serialization(format!("invalid price {}", units)));
    }
    Ok(Money::from_minor((units * MINOR_UNITS as f64).round() as i64))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionValueDto {
    id: OptionValueId,
    #[serde(default)]
    option_id: Option<OptionGroupId>,
    name: String,
    #[serde(default)]
    is_default: bool,
    #[serde(default)]
    additional_price: PriceField,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MenuOptionDto {
    id: OptionGroupId,
    name: String,
    #[serde(rename = "type")]
    mode: SelectionMode,
    #[serde(default)]
    is_required: bool,
    #[serde(default)]
    option_values: Vec<OptionValueDto>,
}

#[derive(Debug, Deserialize)]
struct MenuItemOptionDto {
    #[serde(default = "active")]
    is_active: bool,
    #[serde(default)]
    option: Option<MenuOptionDto>,
}

fn active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct MenuItemDto {
    id: MenuItemId,
    name: String,
    price: f64,
    #[serde(default)]
    menu_option: Vec<MenuItemOptionDto>,
}

#[derive(Debug, Deserialize)]
struct MenuItemListDto {
    #[serde(default)]
    items: Vec<MenuItemDto>,
}

#[derive(Debug, Deserialize)]
struct OrderItemOptionDto {
    #[serde(default)]
    id: Option<OptionAssignmentId>,
    option_id: OptionGroupId,
    value_id: OptionValueId,
    #[serde(default)]
    additional_price: PriceField,
}

#[derive(Debug, Deserialize)]
struct OrderItemDto {
    id: OrderItemId,
    item_id: MenuItemId,
    quantity: u32,
    #[serde(default)]
    options: Option<Vec<OrderItemOptionDto>>,
}

#[derive(Debug, Deserialize)]
struct OrderDetailDto {
    id: OrderId,
    #[serde(default)]
    items: Option<Vec<OrderItemDto>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBodyDto {
    #[serde(default)]
    message: Option<String>,
}

impl MenuOptionDto {
    fn into_group(self) -> Result<OptionGroup> {
        let group_id = self.id;
        let values = self
            .option_values
            .into_iter()
            .map(|v| {
                Ok(OptionValue {
                    id: v.id,
                    group_id: v.option_id.unwrap_or(group_id),
                    name: v.name,
                    price_delta: v.additional_price.to_money()?,
                    is_default: v.is_default,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(OptionGroup {
            id: group_id,
            name: self.name,
            mode: self.mode,
            required: self.is_required,
            values,
        })
    }
}

impl MenuItemDto {
    fn into_menu_item(self) -> Result<MenuItem> {
        let option_groups = self
            .menu_option
            .into_iter()
            .filter(|link| link.is_active)
            .filter_map(|link| link.option)
            .map(MenuOptionDto::into_group)
            .collect::<Result<Vec<_>>>()?;

        Ok(MenuItem {
            id: self.id,
            name: self.name,
            base_price: money_from_units(self.price)?,
            option_groups,
        })
    }
}

impl OrderItemDto {
    fn into_persisted(self) -> Result<PersistedOrderItem> {
        let options = self
            .options
            .unwrap_or_default()
            .into_iter()
            .map(|o| {
                Ok(PersistedOption::new(
                    o.id,
                    o.option_id,
                    o.value_id,
                    o.additional_price.to_money()?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PersistedOrderItem {
            order_item_id: self.id,
            menu_item_id: self.item_id,
            quantity: self.quantity,
            options,
        })
    }
}

/// Parse `json`, unwrapping an API envelope when present
fn decode_payload<T: DeserializeOwned>(json: &str) -> Result<T> {
    let payload = match serde_json::from_str::<Value>(json)? {
        Value::Object(mut map) if map.contains_key("status") && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    Ok(serde_json::from_value(payload)?)
}

/// Decode one menu item with its embedded option groups
pub fn decode_menu_item(json: &str) -> Result<MenuItem> {
    decode_payload::<MenuItemDto>(json)?.into_menu_item()
}

/// Decode a menu item list (`{"items": [...]}`)
pub fn decode_menu_items(json: &str) -> Result<Vec<MenuItem>> {
    decode_payload::<MenuItemListDto>(json)?
        .items
        .into_iter()
        .map(MenuItemDto::into_menu_item)
        .collect()
}

/// Decode an order detail into the persisted state used for reconciliation
pub fn decode_order(json: &str) -> Result<PersistedOrder> {
    let detail: OrderDetailDto = decode_payload(json)?;
    let items = detail
        .items
        .unwrap_or_default()
        .into_iter()
        .map(OrderItemDto::into_persisted)
        .collect::<Result<Vec<_>>>()?;

    Ok(PersistedOrder {
        order_id: detail.id,
        items,
    })
}

/// Map a non-2xx response to a submission error, keeping the server's
/// message when the body carries one
pub fn decode_api_error(status: u16, body: &str) -> SubmissionError {
    let message = serde_json::from_str::<ErrorBodyDto>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.trim().to_string());

    SubmissionError::Rejected { status, message }
}
