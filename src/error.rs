//! Error types for the order composition engine
//!
//! Local errors (schema, quantity, not-found) are recovered where the
//! mutation was attempted and leave the cart in its last valid state.
//! Boundary errors are carried verbatim inside [`OrderError::Submission`].

use crate::cart::CanonicalKey;
use crate::{MenuItemId, OptionGroupId, OptionValueId, OrderItemId};
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, OrderError>;

/// Errors raised by the engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Selection violates required/single-choice constraints
    #[error("Option selection invalid: {}", violations.join("; "))]
    SchemaViolation { violations: Vec<String> },

    /// Selection references a value that is not part of the item's schema.
    /// The client holds a stale menu and must refresh it.
    #[error("Option value {value_id} of group {group_id} is not in the menu schema (stale menu)")]
    DataIntegrity {
        group_id: OptionGroupId,
        value_id: OptionValueId,
    },

    /// Quantity outside `1..=max_line_quantity`
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// No cart entry with this canonical key
    #[error("Cart entry not found: {key}")]
    NotFound { key: CanonicalKey },

    /// Menu item missing from the local catalog
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(MenuItemId),

    /// A submission is already outstanding for this coordinator
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// The order-mutation boundary failed
    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),

    /// Durable storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for OrderError {
    fn from(err: serde_json::Error) -> Self {
        OrderError::Serialization(err.to_string())
    }
}

/// Failures reported by the order-mutation boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Transport-level failure (timeout, connection reset, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Server rejected the request
    #[error("Rejected by server ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// An UPDATE/DELETE referenced an order item the server no longer has
    #[error("Order item {order_item_id} no longer exists on the server")]
    StaleOrderItem { order_item_id: OrderItemId },

    /// The request was superseded or cancelled before it completed
    #[error("Submission cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_violation_message_lists_all() {
        let err = OrderError::SchemaViolation {
            violations: vec![
                "group Spice Level requires a selection.".to_string(),
                "group Size allows only one selection.".to_string(),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("Spice Level"));
        assert!(text.contains("Size"));
    }

    #[test]
    fn test_submission_error_converts() {
        let err: OrderError = SubmissionError::StaleOrderItem { order_item_id: 9 }.into();
        assert!(matches!(
            err,
            OrderError::Submission(SubmissionError::StaleOrderItem { order_item_id: 9 })
        ));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: OrderError = parse.unwrap_err().into();
        assert!(matches!(err, OrderError::Serialization(_)));
    }
}
