//! Selected options and the helpers a configuration screen drives
//!
//! A configured item always carries a flat `Vec<SelectedOption>`, whatever
//! the group's mode. Single-choice is a validation rule, not a storage shape.

use super::schema::{MenuItem, OptionGroup, OptionValue, SelectionMode};
use crate::money::Money;
use crate::{OptionGroupId, OptionValueId};
use serde::{Deserialize, Serialize};

/// A chosen option value, with its price delta captured at selection time
///
/// Field order gives the canonical ordering: group id, then value id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelectedOption {
    pub group_id: OptionGroupId,
    pub value_id: OptionValueId,
    pub price_delta: Money,
}

impl SelectedOption {
    pub fn new(group_id: OptionGroupId, value_id: OptionValueId, price_delta: Money) -> Self {
        Self {
            group_id,
            value_id,
            price_delta,
        }
    }

    /// Capture a catalog value, freezing its current price delta
    pub fn from_value(value: &OptionValue) -> Self {
        Self::new(value.group_id, value.id, value.price_delta)
    }

    /// Identity used for set comparisons (price delta excluded)
    pub fn identity(&self) -> (OptionGroupId, OptionValueId) {
        (self.group_id, self.value_id)
    }
}

/// Initial selection shown when the configuration screen opens.
///
/// Each required group gets its default value, or its first value when none
/// is flagged. Optional groups start empty. Validation never looks at
/// default flags; this runs once, before the user touches anything.
pub fn seed_default_selection(item: &MenuItem) -> Vec<SelectedOption> {
    item.option_groups
        .iter()
        .filter(|group| group.required)
        .filter_map(|group| {
            group
                .values
                .iter()
                .find(|v| v.is_default)
                .or_else(|| group.values.first())
                .map(SelectedOption::from_value)
        })
        .collect()
}

/// Apply a click on `value` to the current selection.
///
/// SINGLE groups replace whatever the group held; MULTIPLE groups toggle the
/// value on or off.
pub fn toggle_selection(selections: &mut Vec<SelectedOption>, group: &OptionGroup, value: &OptionValue) {
    match group.mode {
        SelectionMode::Single => {
            selections.retain(|s| s.group_id != group.id);
            selections.push(SelectedOption::from_value(value));
        }
        SelectionMode::Multiple => {
            let existing = selections
                .iter()
                .position(|s| s.group_id == group.id && s.value_id == value.id);
            match existing {
                Some(index) => {
                    selections.remove(index);
                }
                None => selections.push(SelectedOption::from_value(value)),
            }
        }
    }
}

/// Human-readable summary, e.g. `"Spice Level: Hot | Add-ons: Egg (+฿10)"`.
///
/// Groups appear in schema order; values the schema no longer knows are
/// skipped.
pub fn describe_selection(item: &MenuItem, selections: &[SelectedOption], currency_symbol: &str) -> String {
    item.option_groups
        .iter()
        .filter_map(|group| {
            let names: Vec<String> = selections
                .iter()
                .filter(|s| s.group_id == group.id)
                .filter_map(|s| group.value(s.value_id).map(|v| (v, s.price_delta)))
                .map(|(value, delta)| {
                    if delta > Money::ZERO {
                        format!("{} (+{})", value.name, delta.display_with(currency_symbol))
                    } else {
                        value.name.clone()
                    }
                })
                .collect();

            if names.is_empty() {
                None
            } else {
                Some(format!("{}: {}", group.name, names.join(", ")))
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
