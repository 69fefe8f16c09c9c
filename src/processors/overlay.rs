//! Address-range overlay shared by Cluster and Peripheral processing: when a
//! derived container redeclares a register/cluster at an offset that
//! collides with one inherited from its base, the inherited one (and
//! anything else it displaces) is dropped.

use crate::error::{ElementPath, ResolveError, Warning};
use crate::model::processed::RegisterOrCluster;

fn range(item: &RegisterOrCluster) -> (u64, u64) {
    match item {
        RegisterOrCluster::Register(r) => (r.address_offset, r.address_offset + (r.size as u64) / 8),
        RegisterOrCluster::Cluster(c) => {
            let size = c.size.unwrap_or(32) as u64 / 8;
            (c.address_offset, c.address_offset + size)
        }
    }
}

fn name(item: &RegisterOrCluster) -> &str {
    match item {
        RegisterOrCluster::Register(r) => &r.name,
        RegisterOrCluster::Cluster(c) => &c.name,
    }
}

fn has_alternate(item: &RegisterOrCluster) -> bool {
    match item {
        RegisterOrCluster::Register(r) => r.alternate_register.is_some(),
        RegisterOrCluster::Cluster(c) => c.alternate_cluster.is_some(),
    }
}

fn ranges_overlap(a: (u64, u64), b: (u64, u64)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Overlays `own` (freshly processed) items onto `base`'s items, dropping
/// any base item whose address range collides with an own item.
pub fn merge(own: Vec<RegisterOrCluster>, base: &[RegisterOrCluster]) -> Vec<RegisterOrCluster> {
    let own_ranges: Vec<(u64, u64)> = own.iter().map(range).collect();
    let mut merged: Vec<RegisterOrCluster> = base
        .iter()
        .filter(|b| {
            let br = range(b);
            !own_ranges.iter().any(|&or| ranges_overlap(or, br))
        })
        .cloned()
        .collect();
    merged.extend(own);
    merged.sort_by(|a, b| range(a).0.cmp(&range(b).0).then_with(|| name(a).cmp(name(b))));
    merged
}

/// Validates that the final, merged list has no unexplained overlaps: two
/// items overlapping is fatal unless one of them declares an
/// `alternate*` relationship, in which case it is downgraded to a warning.
pub fn check_overlaps(items: &[RegisterOrCluster], path: &ElementPath, warnings: &mut Vec<Warning>) -> Result<(), ResolveError> {
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if ranges_overlap(range(&items[i]), range(&items[j])) {
                if has_alternate(&items[i]) || has_alternate(&items[j]) {
                    warnings.push(Warning::RegisterOverlapViaAlternate {
                        path: path.clone(),
                        a: name(&items[i]).to_string(),
                        b: name(&items[j]).to_string(),
                    });
                } else {
                    return Err(ResolveError::RegisterOverlap {
                        path: path.clone(),
                        a: name(&items[i]).to_string(),
                        b: name(&items[j]).to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
