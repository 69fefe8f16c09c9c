//! Field processing: bit-range normalisation and access/enum-container
//! merging for a single (already dim-resolved) Field.

use crate::error::{ElementPath, ResolveError};
use crate::model::parsed;
use crate::model::processed;
use crate::model::tokens::Access;

/// Normalises whichever of the three bit-range forms a field used into a
/// concrete `(lsb, msb)` pair.
fn normalize_bit_range(field: &parsed::Field, path: &ElementPath) -> Result<(u32, u32), ResolveError> {
    if let (Some(offset), Some(width)) = (field.bit_offset, field.bit_width) {
        if width == 0 {
            return Err(ResolveError::DimMisconfiguration {
                path: path.clone(),
                reason: "bitWidth must be at least 1".to_string(),
            });
        }
        return Ok((offset, offset + width - 1));
    }

    if let (Some(lsb), Some(msb)) = (field.lsb, field.msb) {
        return Ok((lsb, msb));
    }

    if let Some(range) = &field.bit_range {
        let trimmed = range.trim().trim_start_matches('[').trim_end_matches(']');
        if let Some((msb, lsb)) = trimmed.split_once(':') {
            if let (Ok(msb), Ok(lsb)) = (msb.trim().parse::<u32>(), lsb.trim().parse::<u32>()) {
                return Ok((lsb, msb));
            }
        }
        return Err(ResolveError::DimMisconfiguration {
            path: path.clone(),
            reason: format!("unrecognised bitRange `{range}`"),
        });
    }

    Err(ResolveError::DimMisconfiguration {
        path: path.clone(),
        reason: "field declares no bit-range form (bitOffset/bitWidth, lsb/msb, or bitRange)".to_string(),
    })
}

/// Merges a parsed Field (with optional processed base) into its processed
/// form. Enum containers are copied over normalised but not yet usage- or
/// value-validated; [`crate::enumvalues::check_usage_coexistence`] runs
/// afterwards once all of a field's containers have been processed.
pub fn process(
    field: &parsed::Field,
    base: Option<&processed::Field>,
    parent_access: Access,
    enumerated_value_containers: Vec<processed::EnumeratedValueContainer>,
    path: &ElementPath,
) -> Result<processed::Field, ResolveError> {
    let (lsb, msb) = normalize_bit_range(field, path)?;

    let access = field
        .access
        .unwrap_or_else(|| base.map(|b| b.access).unwrap_or(parent_access));

    let modified_write_values = field
        .modified_write_values
        .or_else(|| base.map(|b| b.modified_write_values))
        .unwrap_or(crate::model::tokens::ModifiedWriteValues::Modify);

    let write_constraint = field
        .write_constraint
        .as_ref()
        .map(|wc| processed::WriteConstraint {
            write_as_read: wc.write_as_read,
            use_enumerated_values: wc.use_enumerated_values,
            range: wc.range,
        })
        .or_else(|| base.and_then(|b| b.write_constraint.clone()));

    let read_action = field.read_action.or_else(|| base.and_then(|b| b.read_action));

    Ok(processed::Field {
        name: field.name.clone(),
        description: field.description.clone(),
        lsb,
        msb,
        access,
        modified_write_values,
        write_constraint,
        read_action,
        enumerated_value_containers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parsed::DimElementGroup;

    fn field_with_offset_width(offset: u32, width: u32) -> parsed::Field {
        parsed::Field {
            dim_element: DimElementGroup::default(),
            name: "F".to_string(),
            description: None,
            bit_offset: Some(offset),
            bit_width: Some(width),
            lsb: None,
            msb: None,
            bit_range: None,
            access: None,
            modified_write_values: None,
            write_constraint: None,
            read_action: None,
            enumerated_value_containers: Vec::new(),
            derived_from: None,
        }
    }

    #[test]
    fn normalizes_offset_width_form() {
        let field = field_with_offset_width(4, 3);
        let (lsb, msb) = normalize_bit_range(&field, &ElementPath::new()).unwrap();
        assert_eq!((lsb, msb), (4, 6));
    }

    #[test]
    fn normalizes_bit_range_string() {
        let mut field = field_with_offset_width(0, 1);
        field.bit_offset = None;
        field.bit_width = None;
        field.bit_range = Some("[7:4]".to_string());
        let (lsb, msb) = normalize_bit_range(&field, &ElementPath::new()).unwrap();
        assert_eq!((lsb, msb), (4, 7));
    }

    #[test]
    fn field_inherits_parent_access_by_default() {
        let field = field_with_offset_width(0, 1);
        let processed = process(&field, None, Access::ReadOnly, Vec::new(), &ElementPath::new()).unwrap();
        assert_eq!(processed.access, Access::ReadOnly);
    }
}
