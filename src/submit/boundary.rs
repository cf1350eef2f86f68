//! External boundaries the engine talks to
//!
//! The HTTP transport lives outside this crate. Hosts implement these
//! traits, typically with [`crate::protocol`] for the JSON bodies. The
//! traits are `?Send` because the browser host is single-threaded.

use crate::error::{Result, SubmissionError};
use crate::menu::{MenuItem, OptionGroup};
use crate::reconcile::{MutationInstruction, PersistedOrder};
use crate::{MenuItemId, OrderId};
use async_trait::async_trait;

/// Acknowledgement of a committed mutation: the order's new persisted
/// state, to be used as `persisted` in the next cycle
pub type Ack = PersistedOrder;

/// `manageOrderItems`
#[async_trait(?Send)]
pub trait OrderMutationBoundary {
    /// Apply `instructions` to order `order_id`, exactly once
    async fn manage_order_items(
        &self,
        order_id: OrderId,
        instructions: &[MutationInstruction],
    ) -> std::result::Result<Ack, SubmissionError>;
}

/// Read-only menu access
#[async_trait(?Send)]
pub trait MenuSource {
    async fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem>;

    async fn get_option_groups(&self, id: MenuItemId) -> Result<Vec<OptionGroup>> {
        Ok(self.get_menu_item(id).await?.option_groups)
    }
}

/// `getOrderWithItems`
#[async_trait(?Send)]
pub trait OrderReader {
    async fn get_order_with_items(&self, order_id: OrderId) -> Result<PersistedOrder>;
}
