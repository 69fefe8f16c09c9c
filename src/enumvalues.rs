//! Normalises `enumeratedValues` containers: parses value literals, expands
//! `x`/`X` wildcard bit patterns into their concrete combinations, and
//! enforces uniqueness and `usage` coexistence.

use itertools::Itertools;

use crate::common::numbers::{parse_int, parse_wildcard_binary};
use crate::error::{ElementPath, ResolveError};
use crate::model::parsed;
use crate::model::processed;
use crate::model::tokens::EnumUsage;

/// Expands a single value literal into its concrete `(name, value)` pairs.
///
/// A literal with no `x` wildcard yields exactly one pair, named as given. A
/// literal with wildcard bits yields one pair per concrete substitution, each
/// named `<name>_<N>` where `N` is the concrete integer value — mirroring the
/// left-to-right substitution order `itertools`' cartesian product produces
/// over `['0', '1']` per wildcard position.
fn expand_value(name: &str, literal: &str) -> Result<Vec<(String, u64)>, ResolveError> {
    if let Some((fixed, wildcard_count, _width)) = parse_wildcard_binary(literal) {
        if wildcard_count == 0 {
            return Ok(vec![(name.to_string(), fixed)]);
        }

        let mut out = Vec::with_capacity(1 << wildcard_count);
        for combo in std::iter::repeat(['0', '1']).take(wildcard_count as usize).multi_cartesian_product() {
            let mut value = fixed;
            let mut combo_iter = combo.into_iter();
            let digits: String = literal
                .trim_start_matches("0b")
                .trim_start_matches("0B")
                .trim_start_matches('#')
                .chars()
                .map(|c| if matches!(c, 'x' | 'X') { combo_iter.next().unwrap() } else { c })
                .collect();
            value = u64::from_str_radix(&digits, 2).unwrap_or(value);
            out.push((format!("{name}_{value}"), value));
        }
        Ok(out)
    } else {
        let value = parse_int(literal).map_err(|_| ResolveError::DimMisconfiguration {
            path: ElementPath::new(),
            reason: format!("invalid enumeratedValue literal `{literal}`"),
        })?;
        Ok(vec![(name.to_string(), value)])
    }
}

/// Processes one parsed `enumeratedValues` container into its concrete form.
///
/// `usage` defaults to `read-write` when absent, per schema.
pub fn process_container(
    container: &parsed::EnumeratedValueContainer,
    path: &ElementPath,
) -> Result<processed::EnumeratedValueContainer, ResolveError> {
    let usage = container.usage.unwrap_or(EnumUsage::ReadWrite);

    let mut out_values = Vec::new();
    let mut seen_values = std::collections::HashSet::new();
    let mut seen_names = std::collections::HashSet::new();

    for entry in &container.enumerated_values {
        let expanded = match &entry.value {
            Some(literal) => expand_value(&entry.name, literal)?,
            None => vec![(entry.name.clone(), 0)],
        };

        let single = expanded.len() == 1;
        for (name, value) in expanded {
            if entry.value.is_some() {
                if !seen_values.insert(value) {
                    return Err(ResolveError::DuplicateEnumValue {
                        path: path.clone(),
                        value,
                    });
                }
            }
            if !seen_names.insert(name.clone()) {
                return Err(ResolveError::DuplicateEnumName { path: path.clone(), name });
            }

            out_values.push(processed::EnumeratedValue {
                name: if single { entry.name.clone() } else { name },
                description: entry.description.clone(),
                value: if entry.value.is_some() { Some(value) } else { None },
                is_default: entry.is_default,
            });
        }
    }

    Ok(processed::EnumeratedValueContainer {
        name: container.name.clone(),
        header_enum_name: container.header_enum_name.clone(),
        usage,
        enumerated_values: out_values,
    })
}

/// Validates that a field's containers coexist per schema: at most two, and
/// only as the `{read, write}` pair; any other combination (a duplicate
/// usage, or either paired with `read-write`) is a fatal [`EnumUsageConflict`](ResolveError::EnumUsageConflict).
pub fn check_usage_coexistence(
    containers: &[processed::EnumeratedValueContainer],
    path: &ElementPath,
) -> Result<(), ResolveError> {
    match containers.len() {
        0 | 1 => Ok(()),
        2 => {
            let usages: Vec<EnumUsage> = containers.iter().map(|c| c.usage).collect();
            let is_read_write_pair = matches!(
                (usages[0], usages[1]),
                (EnumUsage::Read, EnumUsage::Write) | (EnumUsage::Write, EnumUsage::Read)
            );
            if is_read_write_pair {
                Ok(())
            } else {
                Err(ResolveError::EnumUsageConflict { path: path.clone() })
            }
        }
        _ => Err(ResolveError::EnumUsageConflict { path: path.clone() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(name: &str, literal: &str) -> parsed::EnumeratedValue {
        parsed::EnumeratedValue {
            name: name.to_string(),
            description: None,
            value: Some(literal.to_string()),
            is_default: None,
        }
    }

    #[test]
    fn expands_plain_values() {
        let container = parsed::EnumeratedValueContainer {
            name: Some("Mode".to_string()),
            header_enum_name: None,
            usage: None,
            enumerated_values: vec![value("Off", "0"), value("On", "1")],
            derived_from: None,
        };
        let out = process_container(&container, &ElementPath::new()).unwrap();
        assert_eq!(out.usage, EnumUsage::ReadWrite);
        assert_eq!(out.enumerated_values.len(), 2);
    }

    #[test]
    fn expands_wildcard_values() {
        let container = parsed::EnumeratedValueContainer {
            name: None,
            header_enum_name: None,
            usage: None,
            enumerated_values: vec![value("Any", "0bx10")],
            derived_from: None,
        };
        let out = process_container(&container, &ElementPath::new()).unwrap();
        assert_eq!(out.enumerated_values.len(), 2);
        let names: Vec<_> = out.enumerated_values.iter().map(|v| v.name.clone()).collect();
        assert_eq!(names, vec!["Any_2", "Any_6"]);
    }

    #[test]
    fn rejects_duplicate_values() {
        let container = parsed::EnumeratedValueContainer {
            name: None,
            header_enum_name: None,
            usage: None,
            enumerated_values: vec![value("A", "1"), value("B", "1")],
            derived_from: None,
        };
        assert!(process_container(&container, &ElementPath::new()).is_err());
    }

    #[test]
    fn allows_read_write_pair() {
        let read = processed::EnumeratedValueContainer {
            name: None,
            header_enum_name: None,
            usage: EnumUsage::Read,
            enumerated_values: vec![],
        };
        let write = processed::EnumeratedValueContainer {
            usage: EnumUsage::Write,
            ..read.clone()
        };
        assert!(check_usage_coexistence(&[read, write], &ElementPath::new()).is_ok());
    }

    #[test]
    fn rejects_two_read_write_containers() {
        let a = processed::EnumeratedValueContainer {
            name: None,
            header_enum_name: None,
            usage: EnumUsage::ReadWrite,
            enumerated_values: vec![],
        };
        let b = a.clone();
        assert!(check_usage_coexistence(&[a, b], &ElementPath::new()).is_err());
    }
}
