//! WASM bindings for OrderSync
//!
//! This module provides JavaScript-friendly bindings for the cart, the menu
//! helpers and the reconciliation engine.

pub mod bindings;
pub mod utils;

// Re-export main types
pub use bindings::{WasmCart, WasmMenu, WasmReconciler};
