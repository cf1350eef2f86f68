//! Menu catalog, option schemas and the pure functions over them
//!
//! - **schema**: menu items, option groups and option values
//! - **selection**: selected options, default seeding, toggling, descriptions
//! - **validate**: option schema validation
//! - **price**: unit and extended price of a configured item
//!
//! Everything here is read-only with respect to the catalog: the engine
//! never edits menus, it only checks selections against them.

mod price;
mod schema;
mod selection;
mod validate;

pub use price::{price, unit_price, LinePrice};
pub use schema::{Catalog, MenuItem, OptionGroup, OptionValue, SelectionMode};
pub use selection::{describe_selection, seed_default_selection, toggle_selection, SelectedOption};
pub use validate::{validate, Validation};

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared menu fixtures for tests across the crate

    use super::*;
    use crate::money::Money;

    pub const FRIED_RICE: u64 = 1;
    pub const SPICE: u64 = 10;
    pub const MILD: u64 = 101;
    pub const HOT: u64 = 102;
    pub const ADDONS: u64 = 20;
    pub const EGG: u64 = 201;
    pub const SHRIMP: u64 = 202;

    /// "Fried Rice" (฿60) with required SINGLE "Spice Level" and optional
    /// MULTIPLE "Add-ons"
    pub fn fried_rice() -> MenuItem {
        MenuItem {
            id: FRIED_RICE,
            name: "Fried Rice".to_string(),
            base_price: Money::from_units(60),
            option_groups: vec![
                OptionGroup {
                    id: SPICE,
                    name: "Spice Level".to_string(),
                    mode: SelectionMode::Single,
                    required: true,
                    values: vec![
                        value(MILD, SPICE, "Mild", 0, true),
                        value(HOT, SPICE, "Hot", 0, false),
                    ],
                },
                OptionGroup {
                    id: ADDONS,
                    name: "Add-ons".to_string(),
                    mode: SelectionMode::Multiple,
                    required: false,
                    values: vec![
                        value(EGG, ADDONS, "Egg", 10, false),
                        value(SHRIMP, ADDONS, "Shrimp", 20, false),
                    ],
                },
            ],
        }
    }

    /// A plain item without options
    pub fn iced_tea() -> MenuItem {
        MenuItem {
            id: 2,
            name: "Iced Tea".to_string(),
            base_price: Money::from_units(25),
            option_groups: Vec::new(),
        }
    }

    pub fn value(id: u64, group_id: u64, name: &str, delta: i64, is_default: bool) -> OptionValue {
        OptionValue {
            id,
            group_id,
            name: name.to_string(),
            price_delta: Money::from_units(delta),
            is_default,
        }
    }

    /// Select a value of the fried rice fixture by id
    pub fn pick(value_id: u64) -> SelectedOption {
        let item = fried_rice();
        let (_, value) = item
            .find_value(value_id)
            .expect("fixture value exists");
        SelectedOption::from_value(value)
    }
}
