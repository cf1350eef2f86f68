//! Price calculator
//!
//! Pure and deterministic. The calculator does not check quantity; callers
//! reject non-positive quantities first.

use super::schema::MenuItem;
use super::selection::SelectedOption;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Unit and extended price of one configured line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePrice {
    pub unit_price: Money,
    pub extended_price: Money,
}

/// Base price plus the captured delta of every selection
pub fn unit_price(base_price: Money, selections: &[SelectedOption]) -> Money {
    base_price + selections.iter().map(|s| s.price_delta).sum::<Money>()
}

pub fn price(item: &MenuItem, selections: &[SelectedOption], quantity: u32) -> LinePrice {
    let unit_price = unit_price(item.base_price, selections);
    LinePrice {
        unit_price,
        extended_price: unit_price * quantity,
    }
}
