//! Diff the desired cart against the persisted order
//!
//! Matching runs in two passes. First, desired and persisted lines with the
//! same canonical key are paired. Then leftover lines of the same menu item
//! are paired in order, so a changed option becomes an UPDATE with nested
//! option ADD/DELETE rather than a delete-and-re-add. Whatever is still
//! unpaired is an ADD (desired) or a DELETE (persisted).

use super::instruction::{MutationInstruction, OptionInstruction};
use super::persisted::{PersistedOption, PersistedOrderItem};
use crate::cart::{CanonicalKey, ConfiguredItem};
use crate::menu::SelectedOption;
use tracing::debug;

/// Compute the minimal instruction list turning `persisted` into `desired`.
///
/// Output order is every ADD, then every UPDATE (both in desired order),
/// then every DELETE (in persisted order). Lines that already match in
/// quantity and options produce nothing.
pub fn reconcile(desired: &[ConfiguredItem], persisted: &[PersistedOrderItem]) -> Vec<MutationInstruction> {
    let wanted = merge_duplicates(desired);
    let wanted_keys: Vec<CanonicalKey> = wanted.iter().map(ConfiguredItem::key).collect();
    let persisted_keys: Vec<CanonicalKey> = persisted.iter().map(PersistedOrderItem::key).collect();

    let mut pairs: Vec<Option<usize>> = vec![None; wanted.len()];
    let mut taken = vec![false; persisted.len()];

    // Exact configuration matches
    for (i, key) in wanted_keys.iter().enumerate() {
        let found = (0..persisted.len()).find(|&j| !taken[j] && &persisted_keys[j] == key);
        if let Some(j) = found {
            pairs[i] = Some(j);
            taken[j] = true;
        }
    }

    // Same menu item, different options
    for (i, item) in wanted.iter().enumerate() {
        if pairs[i].is_some() {
            continue;
        }
        let found = (0..persisted.len())
            .find(|&j| !taken[j] && persisted[j].menu_item_id == item.menu_item_id);
        if let Some(j) = found {
            pairs[i] = Some(j);
            taken[j] = true;
        }
    }

    let mut adds = Vec::new();
    let mut updates = Vec::new();

    for (item, pair) in wanted.iter().zip(&pairs) {
        match pair {
            None => adds.push(MutationInstruction::add(item)),
            Some(j) => {
                let existing = &persisted[*j];
                let options = diff_options(&item.selections, &existing.options);
                if item.quantity != existing.quantity || !options.is_empty() {
                    updates.push(MutationInstruction::update(item, existing, options));
                }
            }
        }
    }

    let deletes: Vec<MutationInstruction> = persisted
        .iter()
        .zip(&taken)
        .filter(|(_, taken)| !**taken)
        .map(|(row, _)| MutationInstruction::delete(row))
        .collect();

    debug!(
        desired = wanted.len(),
        persisted = persisted.len(),
        added = adds.len(),
        updated = updates.len(),
        deleted = deletes.len(),
        "reconciled cart against persisted order"
    );

    let mut instructions = adds;
    instructions.extend(updates);
    instructions.extend(deletes);
    instructions
}

/// Collapse desired lines sharing a canonical key, dropping empty lines
fn merge_duplicates(desired: &[ConfiguredItem]) -> Vec<ConfiguredItem> {
    let mut merged: Vec<ConfiguredItem> = Vec::with_capacity(desired.len());
    for item in desired.iter().filter(|item| item.quantity > 0) {
        let key = item.key();
        match merged.iter_mut().find(|m| m.key() == key) {
            Some(existing) => existing.quantity += item.quantity,
            None => merged.push(item.clone()),
        }
    }
    merged
}

/// Option-level diff by (group id, value id).
///
/// ADDs first, then UPDATEs (price delta drift), then DELETEs, each sorted.
fn diff_options(desired: &[SelectedOption], persisted: &[PersistedOption]) -> Vec<OptionInstruction> {
    let mut desired = desired.to_vec();
    desired.sort();
    let mut persisted = persisted.to_vec();
    persisted.sort_by_key(PersistedOption::identity);

    let mut adds = Vec::new();
    let mut updates = Vec::new();

    for selection in &desired {
        match persisted.iter().find(|p| p.identity() == selection.identity()) {
            None => adds.push(OptionInstruction::add(selection)),
            Some(existing) if existing.price_delta != selection.price_delta => {
                updates.push(OptionInstruction::update(existing, selection))
            }
            Some(_) => {}
        }
    }

    let deletes = persisted
        .iter()
        .filter(|p| !desired.iter().any(|s| s.identity() == p.identity()))
        .map(OptionInstruction::delete);

    adds.extend(updates);
    adds.extend(deletes);
    adds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::fixtures::*;
    use crate::money::Money;
    use crate::reconcile::Action;
    use proptest::prelude::*;

    fn persisted_from(order_item_id: u64, item: &ConfiguredItem) -> PersistedOrderItem {
        PersistedOrderItem {
            order_item_id,
            menu_item_id: item.menu_item_id,
            quantity: item.quantity,
            options: item
                .selections
                .iter()
                .enumerate()
                .map(|(n, s)| {
                    PersistedOption::new(Some(order_item_id * 100 + n as u64), s.group_id, s.value_id, s.price_delta)
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_persisted_adds_everything() {
        // Hot + Egg merged to quantity 3 in the cart
        let desired = vec![ConfiguredItem::new(FRIED_RICE, &[pick(HOT), pick(EGG)], 3)];
        let instructions = reconcile(&desired, &[]);

        assert_eq!(instructions.len(), 1);
        let add = &instructions[0];
        assert_eq!(add.action, Action::Add);
        assert_eq!(add.order_item_id, None);
        assert_eq!(add.quantity, 3);
        assert_eq!(add.options.len(), 2);
        assert!(add.options.iter().all(|o| o.action == Action::Add));
        assert_eq!(
            add.options.iter().map(|o| (o.group_id, o.value_id)).collect::<Vec<_>>(),
            vec![(SPICE, HOT), (ADDONS, EGG)]
        );
    }

    #[test]
    fn test_changed_option_is_update_not_replace() {
        let persisted = vec![PersistedOrderItem {
            order_item_id: 9,
            menu_item_id: 5,
            quantity: 1,
            options: vec![PersistedOption::new(Some(90), SPICE, MILD, Money::ZERO)],
        }];
        let desired = vec![ConfiguredItem::new(5, &[SelectedOption::new(SPICE, HOT, Money::ZERO)], 1)];

        let instructions = reconcile(&desired, &persisted);
        assert_eq!(instructions.len(), 1);

        let update = &instructions[0];
        assert_eq!(update.action, Action::Update);
        assert_eq!(update.order_item_id, Some(9));
        assert_eq!(update.quantity, 1);

        let options: Vec<_> = update
            .options
            .iter()
            .map(|o| (o.action, o.value_id, o.assignment_id))
            .collect();
        assert_eq!(options, vec![(Action::Add, HOT, None), (Action::Delete, MILD, Some(90))]);
    }

    #[test]
    fn test_identical_state_is_empty() {
        let desired = vec![
            ConfiguredItem::new(FRIED_RICE, &[pick(HOT), pick(EGG)], 2),
            ConfiguredItem::new(2, &[], 1),
        ];
        let persisted: Vec<_> = desired
            .iter()
            .enumerate()
            .map(|(n, item)| persisted_from(n as u64 + 1, item))
            .collect();

        assert!(reconcile(&desired, &persisted).is_empty());
    }

    #[test]
    fn test_quantity_change_only() {
        let before = ConfiguredItem::new(FRIED_RICE, &[pick(MILD)], 1);
        let persisted = vec![persisted_from(7, &before)];
        let desired = vec![ConfiguredItem::new(FRIED_RICE, &[pick(MILD)], 4)];

        let instructions = reconcile(&desired, &persisted);
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].action, Action::Update);
        assert_eq!(instructions[0].order_item_id, Some(7));
        assert_eq!(instructions[0].quantity, 4);
        assert!(instructions[0].options.is_empty());
    }

    #[test]
    fn test_price_drift_is_option_update() {
        let persisted = vec![PersistedOrderItem {
            order_item_id: 3,
            menu_item_id: FRIED_RICE,
            quantity: 1,
            options: vec![
                PersistedOption::new(Some(30), SPICE, MILD, Money::ZERO),
                PersistedOption::new(Some(31), ADDONS, EGG, Money::from_units(5)),
            ],
        }];
        let desired = vec![ConfiguredItem::new(FRIED_RICE, &[pick(MILD), pick(EGG)], 1)];

        let instructions = reconcile(&desired, &persisted);
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].options.len(), 1);
        let option = instructions[0].options[0];
        assert_eq!(option.action, Action::Update);
        assert_eq!(option.assignment_id, Some(31));
        assert_eq!(option.price_delta, Money::from_units(10));
    }

    #[test]
    fn test_removed_line_is_delete_with_option_deletes() {
        let gone = ConfiguredItem::new(FRIED_RICE, &[pick(HOT), pick(SHRIMP)], 2);
        let persisted = vec![persisted_from(12, &gone)];

        let instructions = reconcile(&[], &persisted);
        assert_eq!(instructions.len(), 1);
        let delete = &instructions[0];
        assert_eq!(delete.action, Action::Delete);
        assert_eq!(delete.order_item_id, Some(12));
        assert_eq!(delete.quantity, 2);
        assert_eq!(delete.options.len(), 2);
        assert!(delete.options.iter().all(|o| o.action == Action::Delete && o.assignment_id.is_some()));
    }

    #[test]
    fn test_output_order_add_update_delete() {
        let kept = ConfiguredItem::new(FRIED_RICE, &[pick(MILD)], 1);
        let dropped = ConfiguredItem::new(3, &[], 1);
        let persisted = vec![persisted_from(1, &dropped), persisted_from(2, &kept)];

        let desired = vec![
            ConfiguredItem::new(FRIED_RICE, &[pick(MILD)], 2),
            ConfiguredItem::new(2, &[], 1),
        ];

        let actions: Vec<_> = reconcile(&desired, &persisted)
            .iter()
            .map(|i| (i.action, i.menu_item_id))
            .collect();
        assert_eq!(
            actions,
            vec![(Action::Add, 2), (Action::Update, FRIED_RICE), (Action::Delete, 3)]
        );
    }

    #[test]
    fn test_exact_match_wins_over_menu_item_pairing() {
        let mild = ConfiguredItem::new(FRIED_RICE, &[pick(MILD)], 1);
        let hot = ConfiguredItem::new(FRIED_RICE, &[pick(HOT)], 1);
        let persisted = vec![persisted_from(1, &mild), persisted_from(2, &hot)];

        // Desired lists hot first; it must still pair with server item 2
        let instructions = reconcile(&[hot, mild], &persisted);
        assert!(instructions.is_empty());
    }

    #[test]
    fn test_duplicate_desired_lines_merge() {
        let line = ConfiguredItem::new(2, &[], 1);
        let instructions = reconcile(&[line.clone(), line], &[]);
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].quantity, 2);
    }

    #[test]
    fn test_zero_quantity_desired_is_absent() {
        let line = ConfiguredItem::new(2, &[], 1);
        let persisted = vec![persisted_from(5, &line)];
        let instructions = reconcile(&[ConfiguredItem::new(2, &[], 0)], &persisted);
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].action, Action::Delete);
    }

    fn arb_line() -> impl Strategy<Value = ConfiguredItem> {
        (
            prop_oneof![Just(MILD), Just(HOT)],
            any::<bool>(),
            any::<bool>(),
            1u32..10,
        )
            .prop_map(|(spice, egg, shrimp, quantity)| {
                let mut selections = vec![pick(spice)];
                if egg {
                    selections.push(pick(EGG));
                }
                if shrimp {
                    selections.push(pick(SHRIMP));
                }
                ConfiguredItem::new(FRIED_RICE, &selections, quantity)
            })
    }

    proptest! {
        #[test]
        fn prop_reconcile_against_self_is_empty(lines in prop::collection::vec(arb_line(), 0..8)) {
            let desired = merge_duplicates(&lines);
            let persisted: Vec<_> = desired
                .iter()
                .enumerate()
                .map(|(n, item)| persisted_from(n as u64 + 1, item))
                .collect();
            prop_assert!(reconcile(&lines, &persisted).is_empty());
        }

        #[test]
        fn prop_every_persisted_line_is_accounted_for(
            desired in prop::collection::vec(arb_line(), 0..6),
            before in prop::collection::vec(arb_line(), 0..6),
        ) {
            let persisted: Vec<_> = before
                .iter()
                .enumerate()
                .map(|(n, item)| persisted_from(n as u64 + 1, item))
                .collect();
            let instructions = reconcile(&desired, &persisted);

            // No persisted item is touched twice
            let mut touched: Vec<_> = instructions.iter().filter_map(|i| i.order_item_id).collect();
            let count = touched.len();
            touched.sort();
            touched.dedup();
            prop_assert_eq!(touched.len(), count);

            // ADDs carry no server id, UPDATE/DELETE always do
            for instruction in &instructions {
                prop_assert_eq!(instruction.order_item_id.is_none(), instruction.action == Action::Add);
            }
        }
    }
}
