//! Expansion of `dim`/`dimIncrement`/`dimIndex` into concrete instance names
//! and offsets.
//!
//! An element with `dim` set names either an *array* (`name` contains
//! `[%s]`) or a *list* (`name` contains a bare `%s`); the two forms differ in
//! how the index is spliced into the name. Everything else about expansion —
//! index derivation, offset stepping — is shared.

use crate::error::{ElementPath, ResolveError};
use crate::model::parsed::DimElementGroup;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimForm {
    /// `name` contains `[%s]`; the bracketed placeholder is stripped and the
    /// index appended directly (`Register[%s]` -> `Register0`).
    Array,
    /// `name` contains a bare `%s` with no surrounding brackets; the index is
    /// spliced in place (`Periph%sGroup` -> `Periph0Group`).
    List,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimInstance {
    pub name: String,
    pub offset: u64,
}

const ARRAY_PLACEHOLDER: &str = "[%s]";
const LIST_PLACEHOLDER: &str = "%s";

fn detect_form(name: &str) -> Option<DimForm> {
    if name.contains(ARRAY_PLACEHOLDER) {
        Some(DimForm::Array)
    } else if name.contains(LIST_PLACEHOLDER) {
        Some(DimForm::List)
    } else {
        None
    }
}

fn substitute(name: &str, form: DimForm, index: &str) -> String {
    match form {
        DimForm::Array => name.replace(ARRAY_PLACEHOLDER, index),
        DimForm::List => name.replace(LIST_PLACEHOLDER, index),
    }
}

/// Derives the ordered list of index strings from a `dimIndex` expression.
///
/// `dimIndex` absent means `"0".."dim - 1"`. Otherwise it is a numeric dash
/// range (`"0-3"`), a single-letter range (`"A-F"`), or a comma-separated
/// list; the resulting count must equal `dim`.
fn derive_indices(dim: u32, dim_index: Option<&str>, path: &ElementPath) -> Result<Vec<String>, ResolveError> {
    let indices = match dim_index {
        None => (0..dim).map(|i| i.to_string()).collect::<Vec<_>>(),
        Some(expr) => {
            if let Some((lo, hi)) = expr.split_once('-') {
                if lo.len() == 1 && hi.len() == 1 && lo.chars().next().unwrap().is_ascii_alphabetic() {
                    let lo_c = lo.chars().next().unwrap();
                    let hi_c = hi.chars().next().unwrap();
                    if lo_c > hi_c {
                        return Err(ResolveError::DimMisconfiguration {
                            path: path.clone(),
                            reason: format!("letter range `{expr}` is descending"),
                        });
                    }
                    (lo_c..=hi_c).map(|c| c.to_string()).collect()
                } else if let (Ok(lo_n), Ok(hi_n)) = (lo.parse::<i64>(), hi.parse::<i64>()) {
                    if lo_n > hi_n {
                        return Err(ResolveError::DimMisconfiguration {
                            path: path.clone(),
                            reason: format!("dimIndex range `{expr}` is descending"),
                        });
                    }
                    (lo_n..=hi_n).map(|n| n.to_string()).collect()
                } else {
                    return Err(ResolveError::DimMisconfiguration {
                        path: path.clone(),
                        reason: format!("unrecognised dimIndex range `{expr}`"),
                    });
                }
            } else {
                expr.split(',').map(|s| s.trim().to_string()).collect()
            }
        }
    };

    if indices.len() as u32 != dim {
        return Err(ResolveError::DimMisconfiguration {
            path: path.clone(),
            reason: format!("dimIndex yields {} entries, expected dim={dim}", indices.len()),
        });
    }

    Ok(indices)
}

/// Whether a dim-capable element actually declares a dim group.
pub fn has_dim(group: &DimElementGroup) -> bool {
    group.dim.is_some() || group.dim_increment.is_some() || group.dim_index.is_some()
}

/// Expands a dim-bearing element into its concrete instances.
///
/// `allow_list_form` gates whether a bare `%s` (list form) is accepted;
/// Peripherals only ever expand as arrays, so callers processing a
/// peripheral pass `false`.
pub fn expand(
    name: &str,
    group: &DimElementGroup,
    base_offset: u64,
    allow_list_form: bool,
    path: &ElementPath,
) -> Result<Vec<DimInstance>, ResolveError> {
    let form = detect_form(name);

    let dim = group.dim.ok_or_else(|| ResolveError::DimMisconfiguration {
        path: path.clone(),
        reason: "dim is required once a dim group is present".to_string(),
    })?;

    match form {
        None => {
            return Err(ResolveError::DimMisconfiguration {
                path: path.clone(),
                reason: "dim is set but name contains no `%s`/`[%s]` placeholder".to_string(),
            });
        }
        Some(DimForm::List) if !allow_list_form => {
            return Err(ResolveError::DimMisconfiguration {
                path: path.clone(),
                reason: "list-form dim (bare `%s`) is not permitted here".to_string(),
            });
        }
        _ => {}
    }
    let form = form.unwrap();

    if dim == 0 {
        return Err(ResolveError::DimMisconfiguration {
            path: path.clone(),
            reason: "dim must be at least 1".to_string(),
        });
    }

    let increment = group.dim_increment.ok_or_else(|| ResolveError::DimMisconfiguration {
        path: path.clone(),
        reason: "dimIncrement is required once dim is present".to_string(),
    })?;

    let indices = derive_indices(dim, group.dim_index.as_deref(), path)?;

    let mut instances = Vec::with_capacity(dim as usize);
    let mut seen = std::collections::HashSet::new();
    for (k, index) in indices.iter().enumerate() {
        let instance_name = substitute(name, form, index);
        if !seen.insert(instance_name.clone()) {
            return Err(ResolveError::DimMisconfiguration {
                path: path.clone(),
                reason: format!("dim expansion produced duplicate name `{instance_name}`"),
            });
        }
        instances.push(DimInstance {
            name: instance_name,
            offset: base_offset + (k as u64) * increment,
        });
    }

    Ok(instances)
}

/// Rejects dim groups outright, for elements the schema never allows to be
/// dim-expanded (Fields).
pub fn reject(group: &DimElementGroup, path: &ElementPath) -> Result<(), ResolveError> {
    if has_dim(group) {
        return Err(ResolveError::DimMisconfiguration {
            path: path.clone(),
            reason: "dim is not permitted on this element".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(dim: u32, inc: u64, index: Option<&str>) -> DimElementGroup {
        DimElementGroup {
            dim: Some(dim),
            dim_increment: Some(inc),
            dim_index: index.map(str::to_string),
            dim_name: None,
            dim_array_index: None,
        }
    }

    #[test]
    fn expands_array_form_default_index() {
        let g = group(4, 4, None);
        let path = ElementPath::new();
        let out = expand("Register[%s]", &g, 0, false, &path).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out[0].name, "Register0");
        assert_eq!(out[3].name, "Register3");
        assert_eq!(out[3].offset, 12);
    }

    #[test]
    fn expands_list_form_with_letter_range() {
        let g = group(3, 0, Some("A-C"));
        let path = ElementPath::new();
        let out = expand("Ch%sIn", &g, 0, true, &path).unwrap();
        assert_eq!(out.iter().map(|i| i.name.clone()).collect::<Vec<_>>(), vec!["ChAIn", "ChBIn", "ChCIn"]);
    }

    #[test]
    fn rejects_list_form_for_peripherals() {
        let g = group(2, 4, None);
        let path = ElementPath::new();
        assert!(expand("Periph%s", &g, 0, false, &path).is_err());
    }

    #[test]
    fn rejects_mismatched_dim_index_length() {
        let g = group(3, 4, Some("0-1"));
        let path = ElementPath::new();
        assert!(expand("Reg[%s]", &g, 0, false, &path).is_err());
    }

    #[test]
    fn rejects_dim_without_placeholder() {
        let g = group(2, 4, None);
        let path = ElementPath::new();
        assert!(expand("Register", &g, 0, false, &path).is_err());
    }

    #[test]
    fn reject_rejects_any_dim_group() {
        let g = group(2, 4, None);
        let path = ElementPath::new();
        assert!(reject(&g, &path).is_err());
        assert!(reject(&DimElementGroup::default(), &path).is_ok());
    }
}
