//! Browser `localStorage` backend

use super::CartStorage;
use crate::error::{OrderError, Result};
use wasm_bindgen::JsValue;

/// `window.localStorage`, values stored as UTF-8 strings
pub struct LocalStorage {
    inner: web_sys::Storage,
}

fn js_error(context: &str, err: JsValue) -> OrderError {
    OrderError::Storage(format!("{}: {:?}", context, err))
}

impl LocalStorage {
    /// Open the window's local storage
    pub fn open() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| OrderError::Storage("no window object".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| js_error("localStorage unavailable", e))?
            .ok_or_else(|| OrderError::Storage("localStorage disabled".to_string()))?;
        Ok(Self { inner })
    }
}

impl CartStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .inner
            .get_item(key)
            .map_err(|e| js_error("getItem failed", e))?;
        Ok(value.map(String::into_bytes))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(value)
            .map_err(|e| OrderError::Storage(format!("non UTF-8 payload: {}", e)))?;
        self.inner
            .set_item(key, text)
            .map_err(|e| js_error("setItem failed", e))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.inner
            .remove_item(key)
            .map_err(|e| js_error("removeItem failed", e))
    }
}
