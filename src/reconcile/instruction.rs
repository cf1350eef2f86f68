//! Mutation instructions produced by reconciliation

use super::persisted::{PersistedOption, PersistedOrderItem};
use crate::cart::ConfiguredItem;
use crate::menu::SelectedOption;
use crate::money::Money;
use crate::{MenuItemId, OptionAssignmentId, OptionGroupId, OptionValueId, OrderItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Add,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-option change nested under an item mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionInstruction {
    pub action: Action,
    /// Existing assignment for UPDATE/DELETE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<OptionAssignmentId>,
    pub group_id: OptionGroupId,
    pub value_id: OptionValueId,
    pub price_delta: Money,
}

impl OptionInstruction {
    pub(crate) fn add(selection: &SelectedOption) -> Self {
        Self {
            action: Action::Add,
            assignment_id: None,
            group_id: selection.group_id,
            value_id: selection.value_id,
            price_delta: selection.price_delta,
        }
    }

    /// Re-price an existing assignment with the desired delta
    pub(crate) fn update(existing: &PersistedOption, desired: &SelectedOption) -> Self {
        Self {
            action: Action::Update,
            assignment_id: existing.assignment_id,
            group_id: existing.group_id,
            value_id: existing.value_id,
            price_delta: desired.price_delta,
        }
    }

    pub(crate) fn delete(existing: &PersistedOption) -> Self {
        Self {
            action: Action::Delete,
            assignment_id: existing.assignment_id,
            group_id: existing.group_id,
            value_id: existing.value_id,
            price_delta: existing.price_delta,
        }
    }
}

/// Item-level change to the persisted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationInstruction {
    pub action: Action,
    /// Server item id; `None` exactly for ADD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_item_id: Option<OrderItemId>,
    pub menu_item_id: MenuItemId,
    /// Target quantity (persisted quantity for DELETE)
    pub quantity: u32,
    pub options: Vec<OptionInstruction>,
}

impl MutationInstruction {
    pub(crate) fn add(item: &ConfiguredItem) -> Self {
        Self {
            action: Action::Add,
            order_item_id: None,
            menu_item_id: item.menu_item_id,
            quantity: item.quantity,
            options: item.selections.iter().map(OptionInstruction::add).collect(),
        }
    }

    pub(crate) fn update(item: &ConfiguredItem, existing: &PersistedOrderItem, options: Vec<OptionInstruction>) -> Self {
        Self {
            action: Action::Update,
            order_item_id: Some(existing.order_item_id),
            menu_item_id: item.menu_item_id,
            quantity: item.quantity,
            options,
        }
    }

    /// Options are listed explicitly even though the server cascades
    pub(crate) fn delete(existing: &PersistedOrderItem) -> Self {
        let mut options = existing.options.clone();
        options.sort_by_key(PersistedOption::identity);
        Self {
            action: Action::Delete,
            order_item_id: Some(existing.order_item_id),
            menu_item_id: existing.menu_item_id,
            quantity: existing.quantity,
            options: options.iter().map(OptionInstruction::delete).collect(),
        }
    }
}

/// Counts for UI summaries such as "2 new, 1 changed, 1 removed"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStats {
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Nested option instructions across all items
    pub option_changes: usize,
}

impl InstructionStats {
    pub fn from_instructions(instructions: &[MutationInstruction]) -> Self {
        let mut stats = Self::default();
        for instruction in instructions {
            match instruction.action {
                Action::Add => stats.added += 1,
                Action::Update => stats.updated += 1,
                Action::Delete => stats.deleted += 1,
            }
            stats.option_changes += instruction.options.len();
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.added + self.updated + self.deleted
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for InstructionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} new, {} changed, {} removed",
            self.added, self.updated, self.deleted
        )
    }
}
