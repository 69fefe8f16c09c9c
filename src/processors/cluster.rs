//! Cluster processing: property inheritance, metadata inheritance, and the
//! address-range overlay for `registers_clusters` (see [`super::overlay`]).

use crate::model::parsed;
use crate::model::processed;
use crate::processors::properties::{self, Resolved};

pub struct ClusterMetadata {
    pub description: Option<String>,
    pub alternate_cluster: Option<String>,
    pub header_struct_name: Option<String>,
}

pub fn merge_metadata(own: &parsed::Cluster, base: Option<&processed::Cluster>) -> ClusterMetadata {
    ClusterMetadata {
        description: own.description.clone().or_else(|| base.and_then(|b| b.description.clone())),
        alternate_cluster: own.alternate_cluster.clone().or_else(|| base.and_then(|b| b.alternate_cluster.clone())),
        header_struct_name: own.header_struct_name.clone().or_else(|| base.and_then(|b| b.header_struct_name.clone())),
    }
}

pub fn resolve_properties(
    own: &parsed::RegisterPropertiesGroup,
    base: Option<&processed::Cluster>,
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

