//! Peripheral processing: property inheritance and metadata inheritance.
//!
//! `headerStructName` deliberately does *not* inherit from a derivedFrom
//! base — every other string field and `baseAddress`/`addressBlocks`/
//! `interrupts` do, matching the reference tooling's behaviour.

use crate::error::{ElementPath, Warning};
use crate::model::parsed;
use crate::model::processed;
use crate::processors::properties::{self, Resolved};

pub struct PeripheralMetadata {
    pub version: Option<String>,
    pub description: Option<String>,
    pub alternate_peripheral: Option<String>,
    pub group_name: Option<String>,
    pub prepend_to_name: Option<String>,
    pub append_to_name: Option<String>,
    pub disable_condition: Option<String>,
    pub base_address: u64,
    pub address_blocks: Vec<processed::AddressBlock>,
    pub interrupts: Vec<processed::Interrupt>,
}

pub fn merge_metadata(own: &parsed::Peripheral, base: Option<&processed::Peripheral>) -> PeripheralMetadata {
    PeripheralMetadata {
        version: own.version.clone().or_else(|| base.and_then(|b| b.version.clone())),
        description: own.description.clone().or_else(|| base.and_then(|b| b.description.clone())),
        alternate_peripheral: own.alternate_peripheral.clone().or_else(|| base.and_then(|b| b.alternate_peripheral.clone())),
        group_name: own.group_name.clone().or_else(|| base.and_then(|b| b.group_name.clone())),
        prepend_to_name: own.prepend_to_name.clone().or_else(|| base.and_then(|b| b.prepend_to_name.clone())),
        append_to_name: own.append_to_name.clone().or_else(|| base.and_then(|b| b.append_to_name.clone())),
        disable_condition: own.disable_condition.clone().or_else(|| base.and_then(|b| b.disable_condition.clone())),
        base_address: own.base_address,
        address_blocks: if own.address_blocks.is_empty() {
            base.map(|b| b.address_blocks.clone()).unwrap_or_default()
        } else {
            own.address_blocks
                .iter()
                .map(|ab| processed::AddressBlock {
                    offset: ab.offset,
                    size: ab.size,
                    usage: ab.usage,
                    protection: ab.protection,
                })
                .collect()
        },
        interrupts: if own.interrupts.is_empty() {
            base.map(|b| b.interrupts.clone()).unwrap_or_default()
        } else {
            own.interrupts
                .iter()
                .map(|i| processed::Interrupt {
                    name: i.name.clone(),
                    description: i.description.clone(),
                    value: i.value,
                })
                .collect()
        },
    }
}

fn range(p: &processed::Peripheral) -> (u64, u64) {
    let size = p.size.unwrap_or(32) as u64 / 8;
    (p.base_address, p.base_address + size)
}

fn ranges_overlap(a: (u64, u64), b: (u64, u64)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Reports base-address overlaps among sibling peripherals. Two peripherals
/// sharing a base address are only expected when related via
/// `alternatePeripheral`; either way this is a warning, never fatal, since
/// address-space reuse between peripheral views is common in real devices.
pub fn check_base_address_overlaps(peripherals: &[processed::Peripheral], path: &ElementPath, warnings: &mut Vec<Warning>) {
    for i in 0..peripherals.len() {
        for j in (i + 1)..peripherals.len() {
            if ranges_overlap(range(&peripherals[i]), range(&peripherals[j])) {
                let a = &peripherals[i];
                let b = &peripherals[j];
                let related = a.alternate_peripheral.as_deref() == Some(b.name.as_str()) || b.alternate_peripheral.as_deref() == Some(a.name.as_str());
                let warning = if related {
                    Warning::PeripheralOverlapViaAlternate {
                        path: path.clone(),
                        a: a.name.clone(),
                        b: b.name.clone(),
                    }
                } else {
                    Warning::PeripheralOverlap {
                        path: path.clone(),
                        a: a.name.clone(),
                        b: b.name.clone(),
                    }
                };
                warnings.push(warning);
            }
        }
    }
}

pub fn resolve_properties(
    own: &parsed::RegisterPropertiesGroup,
    base: Option<&processed::Peripheral>,
    ancestors: &[Resolved],
) -> Resolved {
    let base_resolved = base.map(|b| Resolved {
        size: b.size,
        access: b.access,
        protection: b.protection,
        reset_value: b.reset_value,
        reset_mask: b.reset_mask,
    });
    properties::resolve_optional(own, base_resolved.as_ref(), ancestors)
}
