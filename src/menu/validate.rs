//! Option schema validation
//!
//! Soft violations (missing required group, over-selected single group) are
//! collected and reported together. A selection the schema does not know is
//! a hard error: the client's menu is stale and must be refreshed.

use super::schema::{OptionGroup, SelectionMode};
use super::selection::SelectedOption;
use crate::error::{OrderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of validating one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    pub violations: Vec<String>,
}

impl Validation {
    /// Turn soft violations into [`OrderError::SchemaViolation`]
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(OrderError::SchemaViolation {
                violations: self.violations,
            })
        }
    }
}

/// Check `selections` against `schema`.
///
/// Returns `Err(DataIntegrity)` when a selection names a (group, value) pair
/// absent from the schema. Otherwise returns the violations, in schema
/// order, one per broken rule per group.
pub fn validate(schema: &[OptionGroup], selections: &[SelectedOption]) -> Result<Validation> {
    for selection in selections {
        let known = schema
            .iter()
            .find(|g| g.id == selection.group_id)
            .and_then(|g| g.value(selection.value_id))
            .is_some();
        if !known {
            return Err(OrderError::DataIntegrity {
                group_id: selection.group_id,
                value_id: selection.value_id,
            });
        }
    }

    let mut violations = Vec::new();

    for group in schema {
        let chosen: Vec<&SelectedOption> = selections
            .iter()
            .filter(|s| s.group_id == group.id)
            .collect();

        if group.required && chosen.is_empty() {
            violations.push(format!("group {} requires a selection.", group.name));
        }

        if group.mode == SelectionMode::Single && chosen.len() > 1 {
            violations.push(format!("group {} allows only one selection.", group.name));
            continue;
        }

        let mut seen = HashSet::new();
        if chosen.iter().any(|s| !seen.insert(s.value_id)) {
            violations.push(format!("group {} lists the same value twice.", group.name));
        }
    }

    Ok(Validation {
        valid: violations.is_empty(),
        violations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::fixtures::*;
    use crate::menu::MenuItem;
    use crate::money::Money;

    fn schema() -> Vec<OptionGroup> {
        fried_rice().option_groups
    }

    #[test]
    fn test_valid_selection() {
        let result = validate(&schema(), &[pick(HOT), pick(EGG), pick(SHRIMP)]).unwrap();
        assert!(result.valid);
        assert!(result.violations.is_empty());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_required_group_rejection() {
        // One required SINGLE group of two values, nothing selected
        let schema = vec![fried_rice().option_groups[0].clone()];
        let result = validate(&schema, &[]).unwrap();

        assert!(!result.valid);
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].contains("Spice Level"));
        assert_eq!(result.violations[0], "group Spice Level requires a selection.");
    }

    #[test]
    fn test_single_group_over_selected() {
        let result = validate(&schema(), &[pick(MILD), pick(HOT)]).unwrap();
        assert_eq!(
            result.violations,
            vec!["group Spice Level allows only one selection.".to_string()]
        );
    }

    #[test]
    fn test_duplicate_multiple_value() {
        let result = validate(&schema(), &[pick(HOT), pick(EGG), pick(EGG)]).unwrap();
        assert_eq!(
            result.violations,
            vec!["group Add-ons lists the same value twice.".to_string()]
        );
    }

    #[test]
    fn test_unknown_value_is_fatal() {
        let stale = SelectedOption::new(SPICE, 999, Money::ZERO);
        let err = validate(&schema(), &[pick(HOT), stale]).unwrap_err();
        assert_eq!(
            err,
            OrderError::DataIntegrity {
                group_id: SPICE,
                value_id: 999
            }
        );
    }

    #[test]
    fn test_value_under_wrong_group_is_fatal() {
        let misplaced = SelectedOption::new(SPICE, EGG, Money::from_units(10));
        assert!(matches!(
            validate(&schema(), &[misplaced]),
            Err(OrderError::DataIntegrity { .. })
        ));
    }

    #[test]
    fn test_defaults_are_not_special_cased() {
        // Mild is flagged default but an empty selection is still invalid
        let item: MenuItem = fried_rice();
        let result = validate(&item.option_groups, &[]).unwrap();
        assert!(!result.valid);
    }

    #[test]
    fn test_schema_violation_error() {
        let err = validate(&schema(), &[]).unwrap().into_result().unwrap_err();
        assert!(matches!(err, OrderError::SchemaViolation { violations } if violations.len() == 1));
    }
}
