//! Shared register-properties inheritance: `size`, `access`, `protection`,
//! `resetValue`, `resetMask`.
//!
//! Each is resolved independently by the first defined value along
//! `own -> base-processed -> nearest-ancestor-processed -> device-default`.
//! Peripheral and Cluster may still come out with a hole if nothing along the
//! chain defined a given property (the schema allows that; only Register and
//! Field require a concrete value).

use crate::model::parsed::RegisterPropertiesGroup as ParsedProps;
use crate::model::tokens::{Access, Protection};

pub const DEVICE_DEFAULT_SIZE: u32 = 32;
const DEVICE_DEFAULT_ACCESS: Access = Access::ReadWrite;
const DEVICE_DEFAULT_PROTECTION: Protection = Protection::Any;
const DEVICE_DEFAULT_RESET_VALUE: u64 = 0;

pub fn reset_mask_for_size(size: u32) -> u64 {
    if size >= 64 {
        u64::MAX
    } else {
        (1u64 << size) - 1
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Resolved {
    pub size: Option<u32>,
    pub access: Option<Access>,
    pub protection: Option<Protection>,
    pub reset_value: Option<u64>,
    pub reset_mask: Option<u64>,
}

/// Resolves the optional-result form, used for Peripheral and Cluster.
pub fn resolve_optional(own: &ParsedProps, base: Option<&Resolved>, ancestors: &[Resolved]) -> Resolved {
    macro_rules! chain {
        ($field:ident) => {
            own.$field.or_else(|| base.and_then(|b| b.$field)).or_else(|| ancestors.iter().find_map(|a| a.$field))
        };
    }

    Resolved {
        size: chain!(size),
        access: chain!(access),
        protection: chain!(protection),
        reset_value: chain!(reset_value),
        reset_mask: chain!(reset_mask),
    }
}

/// Resolves the concrete form, used for Register, falling back to hard
/// device defaults when the whole chain left a hole.
pub fn resolve_concrete(own: &ParsedProps, base: Option<&Resolved>, ancestors: &[Resolved]) -> (u32, Access, Protection, u64, u64) {
    let resolved = resolve_optional(own, base, ancestors);
    let size = resolved.size.unwrap_or(DEVICE_DEFAULT_SIZE);
    (
        size,
        resolved.access.unwrap_or(DEVICE_DEFAULT_ACCESS),
        resolved.protection.unwrap_or(DEVICE_DEFAULT_PROTECTION),
        resolved.reset_value.unwrap_or(DEVICE_DEFAULT_RESET_VALUE),
        resolved.reset_mask.unwrap_or_else(|| reset_mask_for_size(size)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_wins_over_everything() {
        let own = ParsedProps {
            size: Some(16),
            ..Default::default()
        };
        let resolved = resolve_optional(&own, None, &[]);
        assert_eq!(resolved.size, Some(16));
    }

    #[test]
    fn falls_back_to_ancestor() {
        let own = ParsedProps::default();
        let ancestor = Resolved {
            size: Some(8),
            ..Default::default()
        };
        let resolved = resolve_optional(&own, None, &[ancestor]);
        assert_eq!(resolved.size, Some(8));
    }

    #[test]
    fn concrete_falls_back_to_device_default() {
        let own = ParsedProps::default();
        let (size, access, _protection, reset_value, reset_mask) = resolve_concrete(&own, None, &[]);
        assert_eq!(size, 32);
        assert_eq!(access, Access::ReadWrite);
        assert_eq!(reset_value, 0);
        assert_eq!(reset_mask, 0xFFFF_FFFF);
    }
}
