//! Menu items and their option schemas

use crate::error::{OrderError, Result};
use crate::money::Money;
use crate::{MenuItemId, OptionGroupId, OptionValueId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many values of a group a configured item may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one value
    Single,
    /// Any number of values
    Multiple,
}

/// One choosable value inside an option group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    pub id: OptionValueId,
    pub group_id: OptionGroupId,
    pub name: String,
    /// Additive price contribution; zero or positive in practice
    pub price_delta: Money,
    /// Only used to seed an initial selection
    #[serde(default)]
    pub is_default: bool,
}

/// A named set of related choices (e.g. "Spice Level")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub id: OptionGroupId,
    pub name: String,
    pub mode: SelectionMode,
    #[serde(default)]
    pub required: bool,
    /// Values in display order
    pub values: Vec<OptionValue>,
}

impl OptionGroup {
    pub fn value(&self, value_id: OptionValueId) -> Option<&OptionValue> {
        self.values.iter().find(|v| v.id == value_id)
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub base_price: Money,
    #[serde(default)]
    pub option_groups: Vec<OptionGroup>,
}

impl MenuItem {
    pub fn group(&self, group_id: OptionGroupId) -> Option<&OptionGroup> {
        self.option_groups.iter().find(|g| g.id == group_id)
    }

    /// Locate a value anywhere in the schema
    pub fn find_value(&self, value_id: OptionValueId) -> Option<(&OptionGroup, &OptionValue)> {
        self.option_groups
            .iter()
            .find_map(|g| g.value(value_id).map(|v| (g, v)))
    }

    pub fn has_options(&self) -> bool {
        !self.option_groups.is_empty()
    }

    pub fn has_required_options(&self) -> bool {
        self.option_groups.iter().any(|g| g.required)
    }
}

/// Locally cached menu items keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    items: BTreeMap<MenuItemId, MenuItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item, returning the previous version
    pub fn insert(&mut self, item: MenuItem) -> Option<MenuItem> {
        self.items.insert(item.id, item)
    }

    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.get(&id)
    }

    /// Like [`Catalog::get`] but missing items are an error
    pub fn require(&self, id: MenuItemId) -> Result<&MenuItem> {
        self.get(id).ok_or(OrderError::UnknownMenuItem(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.values()
    }
}

impl FromIterator<MenuItem> for Catalog {
    fn from_iter<I: IntoIterator<Item = MenuItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|item| (item.id, item)).collect(),
        }
    }
}
