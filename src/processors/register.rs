//! Register processing: property inheritance, dim-independent metadata
//! inheritance, and the field bit-range overlay used when merging with a
//! derived-from base.

use crate::error::{ElementPath, ResolveError};
use crate::model::processed;
use crate::processors::properties::{self, Resolved};

fn fields_overlap(a: &processed::Field, b: &processed::Field) -> bool {
    a.lsb <= b.msb && b.lsb <= a.msb
}

/// Rejects overlap among a register's own freshly processed fields.
pub fn check_no_self_overlap(fields: &[processed::Field], path: &ElementPath) -> Result<(), ResolveError> {
    for i in 0..fields.len() {
        for j in (i + 1)..fields.len() {
            if fields_overlap(&fields[i], &fields[j]) {
                return Err(ResolveError::FieldOverlap {
                    path: path.clone(),
                    a: fields[i].name.clone(),
                    b: fields[j].name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Overlays `own` fields onto `base` fields: any base field whose bit range
/// overlaps an own field is dropped, non-overlapping base fields are kept,
/// and the result is sorted ascending by `lsb`.
pub fn merge_fields(own: Vec<processed::Field>, base: &[processed::Field]) -> Vec<processed::Field> {
    let mut merged: Vec<processed::Field> = base
        .iter()
        .filter(|b| !own.iter().any(|o| fields_overlap(o, b)))
        .cloned()
        .collect();
    merged.extend(own);
    merged.sort_by(|a, b| a.lsb.cmp(&b.lsb).then_with(|| a.name.cmp(&b.name)));
    merged
}

pub struct RegisterMetadata {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub alternate_group: Option<String>,
    pub alternate_register: Option<String>,
    pub data_type: Option<crate::model::tokens::DataType>,
    pub modified_write_values: crate::model::tokens::ModifiedWriteValues,
    pub write_constraint: Option<processed::WriteConstraint>,
    pub read_action: Option<crate::model::tokens::ReadAction>,
}

/// Inherits register metadata (everything but properties and fields) from an
/// optional base, own value winning when present.
pub fn merge_metadata(own: &crate::model::parsed::Register, base: Option<&processed::Register>) -> RegisterMetadata {
    RegisterMetadata {
        display_name: own.display_name.clone().or_else(|| base.and_then(|b| b.display_name.clone())),
        description: own.description.clone().or_else(|| base.and_then(|b| b.description.clone())),
        alternate_group: own.alternate_group.clone().or_else(|| base.and_then(|b| b.alternate_group.clone())),
        alternate_register: own.alternate_register.clone().or_else(|| base.and_then(|b| b.alternate_register.clone())),
        data_type: own.data_type.or_else(|| base.and_then(|b| b.data_type)),
        modified_write_values: own
            .modified_write_values
            .or_else(|| base.map(|b| b.modified_write_values))
            .unwrap_or(crate::model::tokens::ModifiedWriteValues::Modify),
        write_constraint: own
            .write_constraint
            .as_ref()
            .map(|wc| processed::WriteConstraint {
                write_as_read: wc.write_as_read,
                use_enumerated_values: wc.use_enumerated_values,
                range: wc.range,
            })
            .or_else(|| base.and_then(|b| b.write_constraint.clone())),
        read_action: own.read_action.or_else(|| base.and_then(|b| b.read_action)),
    }
}

pub fn resolve_properties(
    own: &crate::model::parsed::RegisterPropertiesGroup,
    base: Option<&processed::Register>,
    ancestors: &[Resolved],
) -> (u32, crate::model::tokens::Access, crate::model::tokens::Protection, u64, u64) {
    let base_resolved = base.map(|b| Resolved {
        size: Some(b.size),
        access: Some(b.access),
        protection: Some(b.protection),
        reset_value: Some(b.reset_value),
        reset_mask: Some(b.reset_mask),
    });
    properties::resolve_concrete(own, base_resolved.as_ref(), ancestors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, lsb: u32, msb: u32) -> processed::Field {
        processed::Field {
            name: name.to_string(),
            description: None,
            lsb,
            msb,
            access: crate::model::tokens::Access::ReadWrite,
            modified_write_values: crate::model::tokens::ModifiedWriteValues::Modify,
            write_constraint: None,
            read_action: None,
            enumerated_value_containers: Vec::new(),
        }
    }

    #[test]
    fn overlay_replaces_overlapping_base_field() {
        let base = vec![field("OLD", 0, 3), field("KEEP", 8, 11)];
        let own = vec![field("NEW", 0, 7)];
        let merged = merge_fields(own, &base);
        let names: Vec<_> = merged.iter().map(|f| f.name.clone()).collect();
        assert_eq!(names, vec!["NEW", "KEEP"]);
    }

    #[test]
    fn detects_self_overlap() {
        let fields = vec![field("A", 0, 3), field("B", 2, 5)];
        assert!(check_no_self_overlap(&fields, &ElementPath::new()).is_err());
    }
}
