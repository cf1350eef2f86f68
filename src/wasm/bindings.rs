//! JavaScript bindings for the order composition engine
//!
//! Structured values cross the boundary as JSON strings in the engine's own
//! shapes; raw API payloads go through the `decode*` helpers first.

use crate::cart::{CanonicalKey, Cart};
use crate::config::EngineConfig;
use crate::console_log;
use crate::error::OrderError;
use crate::menu::{self, Catalog, MenuItem, SelectedOption};
use crate::protocol::{decode_api_error, decode_menu_item, decode_order, encode_request};
use crate::reconcile::{reconcile, InstructionStats, MutationInstruction, PersistedOrderItem};
use crate::storage::{CartStorage, LocalStorage, MemoryStorage};
use crate::submit::{PreparedSubmission, SubmissionCoordinator, SubmitOutcome};
use crate::OrderId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn js_error(err: OrderError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn from_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization failed: {}", e)))
}

/// JavaScript-friendly wrapper for the cart aggregator.
///
/// Persists to `localStorage`, or to memory when the browser refuses
/// storage (private mode). Also drives host-performed submissions: the JS
/// side sends the request body from `beginSubmission` and reports back.
#[wasm_bindgen]
pub struct WasmCart {
    inner: Cart<Box<dyn CartStorage>>,
    // Transport runs in JS, so the coordinator carries no boundary
    coordinator: SubmissionCoordinator<()>,
    pending: Option<PreparedSubmission>,
}

#[wasm_bindgen]
impl WasmCart {
    /// Restore the cart saved in `localStorage` (pass config JSON or nothing)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmCart, JsValue> {
        let config = match config_json {
            Some(json) => EngineConfig::from_json(&json).map_err(js_error)?,
            None => EngineConfig::default(),
        };

        let storage: Box<dyn CartStorage> = match LocalStorage::open() {
            Ok(local) => Box::new(local),
            Err(err) => {
                console_log!("ordersync: {}; cart will not survive reloads", err);
                Box::new(MemoryStorage::new())
            }
        };

        Ok(Self {
            inner: Cart::restore(storage, config),
            coordinator: SubmissionCoordinator::new(()),
            pending: None,
        })
    }

    /// Add a configured item; returns the line's canonical key
    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(
        &mut self,
        menu_item_json: &str,
        selections_json: &str,
        quantity: i32,
        note: Option<String>,
    ) -> Result<String, JsValue> {
        let item: MenuItem = from_json(menu_item_json, "menu item")?;
        let selections: Vec<SelectedOption> = from_json(selections_json, "selection")?;
        let key = self
            .inner
            .add_item(&item, &selections, i64::from(quantity), note)
            .map_err(js_error)?;
        Ok(key.to_string())
    }

    /// Set a line's quantity; zero removes it
    #[wasm_bindgen(js_name = updateQuantity)]
    pub fn update_quantity(&mut self, key: &str, quantity: i32) -> Result<(), JsValue> {
        self.inner
            .update_quantity(&CanonicalKey::from(key), i64::from(quantity))
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&mut self, key: &str) -> Result<(), JsValue> {
        self.inner
            .remove_item(&CanonicalKey::from(key))
            .map(|_| ())
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = clear)]
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Totals as JSON: `{item_count, total_quantity, total_price}`
    #[wasm_bindgen(js_name = summary)]
    pub fn summary(&self) -> Result<String, JsValue> {
        to_json(&self.inner.summary())
    }

    /// Cart lines as JSON
    #[wasm_bindgen(js_name = entries)]
    pub fn entries(&self) -> Result<String, JsValue> {
        to_json(self.inner.entries())
    }

    #[wasm_bindgen(js_name = keys)]
    pub fn keys(&self) -> js_sys::Array {
        self.inner
            .state()
            .keys()
            .iter()
            .map(|key| JsValue::from_str(key.as_str()))
            .collect()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Replace the cart with a persisted order's lines (edit sessions).
    /// `catalog_json` is an array of menu items.
    #[wasm_bindgen(js_name = loadPersisted)]
    pub fn load_persisted(&mut self, catalog_json: &str, persisted_json: &str) -> Result<(), JsValue> {
        let items: Vec<MenuItem> = from_json(catalog_json, "catalog")?;
        let persisted: Vec<PersistedOrderItem> = from_json(persisted_json, "persisted order")?;
        let catalog: Catalog = items.into_iter().collect();
        self.inner.load_persisted(&catalog, &persisted).map_err(js_error)
    }

    /// Diff the cart against persisted items; returns instructions JSON
    #[wasm_bindgen(js_name = reconcile)]
    pub fn reconcile(&self, persisted_json: &str) -> Result<String, JsValue> {
        let persisted: Vec<PersistedOrderItem> = from_json(persisted_json, "persisted order")?;
        to_json(&reconcile(&self.inner.state().configured_items(), &persisted))
    }

    /// Start a submission. Returns the `manageOrderItems` request body, or
    /// `undefined` when the cart already matches the persisted order.
    #[wasm_bindgen(js_name = beginSubmission)]
    pub fn begin_submission(&mut self, order_id: OrderId, persisted_json: &str) -> Result<Option<String>, JsValue> {
        let persisted: Vec<PersistedOrderItem> = from_json(persisted_json, "persisted order")?;
        let prepared = match self
            .coordinator
            .prepare(&self.inner, order_id, &persisted)
            .map_err(js_error)?
        {
            Some(prepared) => prepared,
            None => return Ok(None),
        };

        let body = encode_request(order_id, &prepared.instructions).map_err(js_error)?;
        self.pending = Some(prepared);
        Ok(Some(body))
    }

    /// Report a 2xx response (order detail JSON, envelope or bare).
    /// Returns `"committed"` or `"superseded"`. An unreadable body still
    /// settles the cart; the decode error is then the rejection message.
    #[wasm_bindgen(js_name = finishSubmission)]
    pub fn finish_submission(&mut self, response_json: &str) -> Result<String, JsValue> {
        let decoded = decode_order(response_json);
        let prepared = self
            .pending
            .take()
            .ok_or_else(|| JsValue::from_str("No submission in flight"))?;

        let completed = match decoded {
            Ok(ack) => self.coordinator.complete(prepared, Ok(ack), &mut self.inner),
            Err(err) => self.coordinator.complete_without_ack(prepared, err, &mut self.inner),
        };

        match completed {
            Ok(SubmitOutcome::Superseded) => Ok("superseded".to_string()),
            Ok(_) => Ok("committed".to_string()),
            Err(err) => Err(js_error(err)),
        }
    }

    /// Report a failed response. The cart is kept; the error is returned
    /// as the rejection message.
    #[wasm_bindgen(js_name = failSubmission)]
    pub fn fail_submission(&mut self, status: u16, body: &str) -> Result<(), JsValue> {
        let prepared = self
            .pending
            .take()
            .ok_or_else(|| JsValue::from_str("No submission in flight"))?;

        match self
            .coordinator
            .complete(prepared, Err(decode_api_error(status, body)), &mut self.inner)
        {
            Ok(_) => Ok(()),
            Err(err) => Err(js_error(err)),
        }
    }

    /// Abandon the in-flight submission (navigation away)
    #[wasm_bindgen(js_name = cancelSubmission)]
    pub fn cancel_submission(&mut self) -> bool {
        self.pending = None;
        self.coordinator.cancel()
    }

    /// Export the cart state as JSON
    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        to_json(self.inner.state())
    }
}

/// Stateless menu helpers for the item configuration screen
#[wasm_bindgen]
pub struct WasmMenu;

#[wasm_bindgen]
impl WasmMenu {
    /// Convert a menu API item into the engine's menu item JSON
    #[wasm_bindgen(js_name = decodeMenuItem)]
    pub fn decode_menu_item(api_json: &str) -> Result<String, JsValue> {
        to_json(&decode_menu_item(api_json).map_err(js_error)?)
    }

    /// Initial selection for a freshly opened item
    #[wasm_bindgen(js_name = seedDefaults)]
    pub fn seed_defaults(menu_item_json: &str) -> Result<String, JsValue> {
        let item: MenuItem = from_json(menu_item_json, "menu item")?;
        to_json(&menu::seed_default_selection(&item))
    }

    /// Apply a click on option value `value_id`; returns the new selection
    #[wasm_bindgen(js_name = toggle)]
    pub fn toggle(menu_item_json: &str, selections_json: &str, value_id: u64) -> Result<String, JsValue> {
        let item: MenuItem = from_json(menu_item_json, "menu item")?;
        let mut selections: Vec<SelectedOption> = from_json(selections_json, "selection")?;
        let (group, value) = item
            .find_value(value_id)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown option value {}", value_id)))?;
        menu::toggle_selection(&mut selections, group, value);
        to_json(&selections)
    }

    /// `{valid, violations}`; a stale value id is thrown as an error
    #[wasm_bindgen(js_name = validate)]
    pub fn validate(menu_item_json: &str, selections_json: &str) -> Result<String, JsValue> {
        let item: MenuItem = from_json(menu_item_json, "menu item")?;
        let selections: Vec<SelectedOption> = from_json(selections_json, "selection")?;
        to_json(&menu::validate(&item.option_groups, &selections).map_err(js_error)?)
    }

    /// `{unit_price, extended_price}` in minor units
    #[wasm_bindgen(js_name = price)]
    pub fn price(menu_item_json: &str, selections_json: &str, quantity: u32) -> Result<String, JsValue> {
        let item: MenuItem = from_json(menu_item_json, "menu item")?;
        let selections: Vec<SelectedOption> = from_json(selections_json, "selection")?;
        to_json(&menu::price(&item, &selections, quantity))
    }

    #[wasm_bindgen(js_name = describe)]
    pub fn describe(menu_item_json: &str, selections_json: &str, currency_symbol: &str) -> Result<String, JsValue> {
        let item: MenuItem = from_json(menu_item_json, "menu item")?;
        let selections: Vec<SelectedOption> = from_json(selections_json, "selection")?;
        Ok(menu::describe_selection(&item, &selections, currency_symbol))
    }
}

/// Stateless reconciliation helpers
#[wasm_bindgen]
pub struct WasmReconciler;

#[wasm_bindgen]
impl WasmReconciler {
    /// Convert an order detail API response into persisted items JSON
    #[wasm_bindgen(js_name = decodeOrder)]
    pub fn decode_order(api_json: &str) -> Result<String, JsValue> {
        to_json(&decode_order(api_json).map_err(js_error)?.items)
    }

    /// Diff configured items against persisted items
    #[wasm_bindgen(js_name = reconcile)]
    pub fn reconcile(desired_json: &str, persisted_json: &str) -> Result<String, JsValue> {
        let desired: Vec<crate::cart::ConfiguredItem> = from_json(desired_json, "desired items")?;
        let persisted: Vec<PersistedOrderItem> = from_json(persisted_json, "persisted order")?;
        to_json(&reconcile(&desired, &persisted))
    }

    /// Build the `manageOrderItems` body from instructions JSON
    #[wasm_bindgen(js_name = encodeRequest)]
    pub fn encode_request(order_id: OrderId, instructions_json: &str) -> Result<String, JsValue> {
        let instructions: Vec<MutationInstruction> = from_json(instructions_json, "instructions")?;
        encode_request(order_id, &instructions).map_err(js_error)
    }

    /// "2 new, 1 changed, 1 removed"
    #[wasm_bindgen(js_name = summarize)]
    pub fn summarize(instructions_json: &str) -> Result<String, JsValue> {
        let instructions: Vec<MutationInstruction> = from_json(instructions_json, "instructions")?;
        Ok(InstructionStats::from_instructions(&instructions).to_string())
    }
}
