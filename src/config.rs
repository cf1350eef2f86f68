//! Engine configuration
//!
//! Hosts pass configuration as JSON (usually embedded in the page); every
//! field is optional and falls back to its default.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Key the web client stores its cart snapshot under
pub const DEFAULT_STORAGE_KEY: &str = "restaurant-cart";

/// Default upper bound on a single cart line
pub const DEFAULT_MAX_LINE_QUANTITY: u32 = 99;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Key under which the cart snapshot lives in durable storage
    pub storage_key: String,

    /// Symbol used when rendering prices
    pub currency_symbol: String,

    /// Largest quantity a single cart line may hold
    pub max_line_quantity: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency_symbol: "฿".to_string(),
            max_line_quantity: DEFAULT_MAX_LINE_QUANTITY,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
