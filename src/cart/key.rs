//! Canonical key: identity of a cart line
//!
//! Format: `{menu_item_id}#{group}:{value}|{group}:{value}...` with the
//! selections sorted by (group id, value id). Price deltas and notes do not
//! participate, so the same configuration always maps to the same key
//! whatever order the options were clicked in.

use crate::menu::SelectedOption;
use crate::MenuItemId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn new(menu_item_id: MenuItemId, selections: &[SelectedOption]) -> Self {
        let options = normalize_selections(selections)
            .iter()
            .map(|s| format!("{}:{}", s.group_id, s.value_id))
            .collect::<Vec<_>>()
            .join("|");
        CanonicalKey(format!("{}#{}", menu_item_id, options))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CanonicalKey {
    fn from(s: &str) -> Self {
        CanonicalKey(s.to_string())
    }
}

/// Sorted copy of `selections`, by (group id, value id)
pub fn normalize_selections(selections: &[SelectedOption]) -> Vec<SelectedOption> {
    let mut sorted = selections.to_vec();
    sorted.sort();
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::fixtures::*;

    #[test]
    fn test_key_format() {
        let key = CanonicalKey::new(FRIED_RICE, &[pick(EGG), pick(HOT)]);
        assert_eq!(key.as_str(), "1#10:102|20:201");
    }

    #[test]
    fn test_key_ignores_order() {
        let a = CanonicalKey::new(FRIED_RICE, &[pick(SHRIMP), pick(HOT), pick(EGG)]);
        let b = CanonicalKey::new(FRIED_RICE, &[pick(EGG), pick(SHRIMP), pick(HOT)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_distinguishes_menu_item_and_options() {
        let hot = CanonicalKey::new(FRIED_RICE, &[pick(HOT)]);
        let mild = CanonicalKey::new(FRIED_RICE, &[pick(MILD)]);
        let other = CanonicalKey::new(2, &[pick(HOT)]);
        assert_ne!(hot, mild);
        assert_ne!(hot, other);
        assert_eq!(CanonicalKey::new(2, &[]).as_str(), "2#");
    }
}
