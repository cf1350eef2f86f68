//! Wire protocol for the REST boundaries
//!
//! Outbound: the `manageOrderItems` request body built from reconciliation
//! output. Inbound: menu items and order details, decoded into the engine's
//! own types. Prices on the wire are decimal currency units; they are
//! converted to [`Money`](crate::money::Money) at this edge.

mod request;
mod response;

pub use request::{encode_request, ManageOrderItemsRequest, WireItem, WireOption};
pub use response::{decode_api_error, decode_menu_item, decode_menu_items, decode_order};
