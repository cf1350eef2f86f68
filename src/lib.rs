//! OrderSync Core - Order composition engine
//!
//! The Rust core of the diner ordering client, compiled to both native and
//! WASM. It implements:
//! - Option schema validation and pricing of configured menu items
//! - A canonical, deduplicated cart persisted to local storage
//! - Reconciliation of the cart against the persisted server order
//! - A single-flight submission coordinator over an async order boundary
//!
//! # Examples
//!
//! ```rust
//! use ordersync_core::{reconcile, Cart, EngineConfig, MemoryStorage};
//! use ordersync_core::menu::MenuItem;
//! use ordersync_core::money::Money;
//!
//! let tea = MenuItem {
//!     id: 2,
//!     name: "Iced Tea".to_string(),
//!     base_price: Money::from_units(25),
//!     option_groups: vec![],
//! };
//!
//! let mut cart = Cart::new(MemoryStorage::new(), EngineConfig::default());
//! cart.add_item(&tea, &[], 2, None).unwrap();
//!
//! let instructions = reconcile(&cart.state().configured_items(), &[]);
//! assert_eq!(instructions.len(), 1);
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod menu;
pub mod money;
pub mod protocol;
pub mod reconcile;
pub mod storage;
pub mod submit;

#[cfg(feature = "wasm")]
pub mod wasm;

// Smaller allocator for the lite browser bundle
#[cfg(all(feature = "lite", target_arch = "wasm32"))]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Re-exports for convenience
pub use cart::{CanonicalKey, Cart, CartState, CartSummary, ConfiguredItem};
pub use config::EngineConfig;
pub use error::{OrderError, Result, SubmissionError};
pub use money::Money;
pub use reconcile::{reconcile, MutationInstruction, PersistedOrderItem};
pub use storage::{CartStorage, MemoryStorage};
pub use submit::{SubmissionCoordinator, SubmitOutcome};

/// Menu item identifier
pub type MenuItemId = u64;

/// Option group identifier (`option_id` on the wire)
pub type OptionGroupId = u64;

/// Option value identifier (`option_val_id` on the wire)
pub type OptionValueId = u64;

/// Server-side order identifier
pub type OrderId = u64;

/// Server-side order line identifier
pub type OrderItemId = u64;

/// Server-side option assignment identifier
pub type OptionAssignmentId = u64;
