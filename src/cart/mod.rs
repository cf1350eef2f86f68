//! Cart: the diner's canonical, deduplicated set of configured items
//!
//! # Invariants
//!
//! - **Uniqueness:** no two entries share a canonical key; equal
//!   configurations merge by summing quantity
//! - **Derived totals:** summaries are recomputed from entries on every read
//! - **Write-through:** every mutation stores the full state as JSON
//!
//! # Example
//!
//! ```
//! use ordersync_core::cart::Cart;
//! use ordersync_core::config::EngineConfig;
//! use ordersync_core::menu::MenuItem;
//! use ordersync_core::money::Money;
//! use ordersync_core::storage::MemoryStorage;
//!
//! let tea = MenuItem {
//!     id: 2,
//!     name: "Iced Tea".to_string(),
//!     base_price: Money::from_units(25),
//!     option_groups: vec![],
//! };
//!
//! let mut cart = Cart::new(MemoryStorage::new(), EngineConfig::default());
//! cart.add_item(&tea, &[], 1, None).unwrap();
//! cart.add_item(&tea, &[], 2, None).unwrap();
//!
//! assert_eq!(cart.entries().len(), 1);
//! assert_eq!(cart.summary().total_price, Money::from_units(75));
//! ```

mod aggregator;
mod item;
mod key;
mod state;

pub use aggregator::Cart;
pub use item::{CartEntry, ConfiguredItem};
pub use key::{normalize_selections, CanonicalKey};
pub use state::{CartState, CartSummary};
